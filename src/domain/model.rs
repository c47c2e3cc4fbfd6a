use crate::domain::units::{convert_weight, WeightUnit};
use serde::{Deserialize, Deserializer, Serialize};

pub const SHIPMENT_TYPE: &str = "SHIPMENT";
pub const ORGANIZATION_TYPE: &str = "ORGANIZATION";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub reference_id: String,
    /// Organization ids, not checked against the organization store.
    pub organizations: Vec<String>,
    pub transport_packs: TransportPacks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportPacks {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub total_weight: Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub weight: f64,
    pub unit: WeightUnit,
}

impl Weight {
    pub fn new(weight: f64, unit: WeightUnit) -> Self {
        Self { weight, unit }
    }

    pub fn convert_to(&self, target: WeightUnit) -> f64 {
        convert_weight(self.weight, self.unit, target)
    }
}

/// Clients send magnitudes either as JSON numbers or as strings like "4.5".
fn number_or_numeric_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Magnitude {
        Number(f64),
        Text(String),
    }

    match Magnitude::deserialize(deserializer)? {
        Magnitude::Number(value) => Ok(value),
        Magnitude::Text(text) => match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(serde::de::Error::custom(format!(
                "weight '{}' is not a number",
                text
            ))),
        },
    }
}

/// A stored record rendered back with its `type` discriminator.
#[derive(Debug, Serialize)]
pub struct Tagged<'a, T> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(flatten)]
    pub record: &'a T,
}

impl<'a> Tagged<'a, Shipment> {
    pub fn shipment(record: &'a Shipment) -> Self {
        Self {
            kind: SHIPMENT_TYPE,
            record,
        }
    }
}

impl<'a> Tagged<'a, Organization> {
    pub fn organization(record: &'a Organization) -> Self {
        Self {
            kind: ORGANIZATION_TYPE,
            record,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalWeight {
    pub weight: f64,
    pub unit: WeightUnit,
}
