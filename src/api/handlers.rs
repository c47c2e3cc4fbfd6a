use crate::api::AppState;
use crate::core::aggregation;
use crate::core::{Organization, RecordStore, Shipment};
use crate::domain::model::{Tagged, TotalWeight, ORGANIZATION_TYPE, SHIPMENT_TYPE};
use crate::domain::units::WeightUnit;
use crate::utils::error::{Result, ServiceError};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

type SharedState<S, O> = State<Arc<AppState<S, O>>>;

#[derive(Debug, Deserialize)]
pub struct TotalWeightQuery {
    pub unit: Option<String>,
}

/// Parses a write body whose `type` field must equal `expected`.
///
/// The discriminator is checked before the record shape, so a body with the
/// wrong `type` is rejected as such even when the rest would not parse.
pub fn parse_tagged<T: DeserializeOwned>(body: &[u8], expected: &'static str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_slice(body)?;

    if value.get("type").and_then(serde_json::Value::as_str) != Some(expected) {
        return Err(ServiceError::InvalidDiscriminator { expected });
    }

    Ok(serde_json::from_value(value)?)
}

pub async fn create_shipment<S, O>(
    State(state): SharedState<S, O>,
    body: Bytes,
) -> Result<StatusCode>
where
    S: RecordStore<Shipment>,
    O: RecordStore<Organization>,
{
    let shipment: Shipment = parse_tagged(&body, SHIPMENT_TYPE)?;
    tracing::debug!(
        "Storing shipment '{}' with {} nodes",
        shipment.reference_id,
        shipment.transport_packs.nodes.len()
    );

    state
        .shipments
        .upsert(shipment.reference_id.clone(), shipment)?;
    Ok(StatusCode::OK)
}

pub async fn create_organization<S, O>(
    State(state): SharedState<S, O>,
    body: Bytes,
) -> Result<StatusCode>
where
    S: RecordStore<Shipment>,
    O: RecordStore<Organization>,
{
    let organization: Organization = parse_tagged(&body, ORGANIZATION_TYPE)?;
    tracing::debug!("Storing organization '{}'", organization.id);

    state
        .organizations
        .upsert(organization.id.clone(), organization)?;
    Ok(StatusCode::OK)
}

pub async fn get_shipment<S, O>(
    State(state): SharedState<S, O>,
    Path(shipment_id): Path<String>,
) -> Result<Response>
where
    S: RecordStore<Shipment>,
    O: RecordStore<Organization>,
{
    let shipment = state
        .shipments
        .get(&shipment_id)?
        .ok_or(ServiceError::NotFound { kind: "shipment" })?;

    Ok(Json(Tagged::shipment(&shipment)).into_response())
}

pub async fn get_organization<S, O>(
    State(state): SharedState<S, O>,
    Path(organization_id): Path<String>,
) -> Result<Response>
where
    S: RecordStore<Shipment>,
    O: RecordStore<Organization>,
{
    let organization = state
        .organizations
        .get(&organization_id)?
        .ok_or(ServiceError::NotFound {
            kind: "organization",
        })?;

    Ok(Json(Tagged::organization(&organization)).into_response())
}

pub async fn total_weight<S, O>(
    State(state): SharedState<S, O>,
    Query(query): Query<TotalWeightQuery>,
) -> Result<Json<TotalWeight>>
where
    S: RecordStore<Shipment>,
    O: RecordStore<Organization>,
{
    let unit = match query.unit.as_deref() {
        Some(raw) => raw.parse::<WeightUnit>()?,
        None => WeightUnit::default(),
    };

    let weight = aggregation::total_weight(&state.shipments, unit)?;
    Ok(Json(TotalWeight { weight, unit }))
}
