use crate::core::RecordStore;
use crate::domain::model::Shipment;
use crate::domain::units::WeightUnit;
use crate::utils::error::Result;

/// Weight of one shipment's nodes, expressed in `target`.
pub fn shipment_weight(shipment: &Shipment, target: WeightUnit) -> f64 {
    shipment
        .transport_packs
        .nodes
        .iter()
        .map(|node| node.total_weight.convert_to(target))
        .sum()
}

pub fn sum_shipments<'a, I>(shipments: I, target: WeightUnit) -> f64
where
    I: IntoIterator<Item = &'a Shipment>,
{
    shipments
        .into_iter()
        .map(|shipment| shipment_weight(shipment, target))
        .sum()
}

/// Sums every node weight of every stored shipment in `target`.
///
/// An empty store and a store whose weights cancel out both yield `0.0`;
/// callers cannot tell the two apart from the result.
pub fn total_weight<S>(store: &S, target: WeightUnit) -> Result<f64>
where
    S: RecordStore<Shipment>,
{
    let (shipments, nodes, total) = store.fold((0usize, 0usize, 0.0f64), |acc, shipment| {
        (
            acc.0 + 1,
            acc.1 + shipment.transport_packs.nodes.len(),
            acc.2 + shipment_weight(shipment, target),
        )
    })?;

    tracing::debug!(
        "Aggregated {} nodes across {} shipments: {} {}",
        nodes,
        shipments,
        total,
        target
    );

    Ok(total)
}
