use serde::Serialize;

/// One concrete apartment produced by census expansion.
///
/// Identity is `{type}-{seq}` with a 1-based sequence within the type.
/// Instances are created once per expansion pass and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ApartmentInstance {
    pub id: String,
    pub type_name: String,
    /// 1-based sequence within the apartment type.
    pub seq: u32,
    pub rooms: u32,
    /// Devices grouped by type in the configured device draw order.
    pub devices: Vec<DeviceInstance>,
}

/// One concrete device inside an apartment.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInstance {
    pub device_type: String,
    /// Identity of the owning apartment (back-reference, not ownership).
    pub apartment_id: String,
    /// 1-based sequence within the apartment, per device type.
    pub seq: u32,
}

impl ApartmentInstance {
    /// Number of devices of the given type in this apartment.
    #[must_use]
    pub fn device_count(&self, device_type: &str) -> u32 {
        self.devices
            .iter()
            .filter(|d| d.device_type == device_type)
            .count() as u32
    }
}
