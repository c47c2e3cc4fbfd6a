pub mod aggregation;
pub mod store;

pub use crate::domain::model::{Organization, Shipment};
pub use crate::domain::ports::RecordStore;
pub use crate::utils::error::Result;
