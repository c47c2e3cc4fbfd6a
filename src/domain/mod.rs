// Domain layer: records, weight units and the store port. No transport concerns here.

pub mod model;
pub mod ports;
pub mod units;
