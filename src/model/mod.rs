pub mod apartment;
pub mod tower;

pub use apartment::{ApartmentInstance, DeviceInstance};
pub use tower::{Floor, SwitchUnit, Tower, UpsUnit};
