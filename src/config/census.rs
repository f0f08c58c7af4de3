//! The apartment census: how many apartments of each type, and what
//! network devices each type carries.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use crate::config::drawing::DrawingConfig;
use crate::error::ConfigError;

/// Definition of one apartment type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApartmentTypeDef {
    /// How many apartments of this type the building contains.
    pub count: u32,
    /// Room count, carried through to the device schedule unchanged.
    #[serde(default)]
    pub rooms: u32,
    /// Device counts per device type, e.g. `{"ap": 2, "tv": 3}`.
    pub devices: IndexMap<String, u32>,
}

/// The full census, keyed by apartment-type identifier.
///
/// The underlying map preserves the order the types appear in the
/// census file; expansion processes them in exactly that order.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CensusConfig {
    pub apartment_types: IndexMap<String, ApartmentTypeDef>,
}

impl CensusConfig {
    /// Loads and parses a census file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be read and
    /// [`ConfigError::InvalidJson`] if it does not match the schema.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let content = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::FileRead {
            path: path_ref.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::InvalidJson {
            path: path_ref.to_path_buf(),
            source,
        })
    }

    /// Checks every census device type against the drawing config's
    /// style and switch-mapping tables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownDeviceType`] for a device with no
    /// style entry and [`ConfigError::UnmappedDeviceType`] for a device
    /// with no switch mapping. Both are fatal before any expansion or
    /// layout runs.
    pub fn validate_against(&self, drawing: &DrawingConfig) -> Result<(), ConfigError> {
        for (type_name, def) in &self.apartment_types {
            for device in def.devices.keys() {
                if !drawing.devices.contains_key(device) {
                    return Err(ConfigError::UnknownDeviceType {
                        apartment_type: type_name.clone(),
                        device: device.clone(),
                    });
                }
                if !drawing.switch_mapping.contains_key(device) {
                    return Err(ConfigError::UnmappedDeviceType {
                        device: device.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Sum of `count` across all apartment types.
    #[must_use]
    pub fn total_apartments(&self) -> u32 {
        self.apartment_types.values().map(|d| d.count).sum()
    }
}
