pub mod census;
pub mod drawing;

pub use crate::error::ConfigError;
pub use census::{ApartmentTypeDef, CensusConfig};
pub use drawing::{DeviceStyle, DrawingConfig, GeometryConfig, SwitchClass, TowerConfig, TowerPolicy};
