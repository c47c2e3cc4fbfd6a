pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use api::{router, serve, AppState};
pub use config::{ServerConfig, ServiceSettings};
pub use core::{aggregation::total_weight, store::InMemoryStore};
pub use domain::units::{convert_weight, is_unit_valid, WeightUnit};
pub use utils::error::{Result, ServiceError};
