//! Census expansion: per-type counts become concrete apartment and
//! device instances.

use log::warn;

use crate::config::{CensusConfig, DrawingConfig};
use crate::error::ConfigError;
use crate::model::{ApartmentInstance, DeviceInstance};

/// Expands the census into an ordered sequence of apartment instances.
///
/// Apartment types are processed in census order; within a type,
/// instances are numbered 1..count. Each instance carries its device
/// list grouped by type in the drawing config's device draw order,
/// sequence-numbered within each type. A type with count 0 produces no
/// instances and logs a warning.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownDeviceType`] if a census entry counts
/// devices of a type with no style entry.
pub fn expand_census(
    census: &CensusConfig,
    drawing: &DrawingConfig,
) -> Result<Vec<ApartmentInstance>, ConfigError> {
    let mut apartments = Vec::with_capacity(census.total_apartments() as usize);

    for (type_name, def) in &census.apartment_types {
        for device in def.devices.keys() {
            if !drawing.devices.contains_key(device) {
                return Err(ConfigError::UnknownDeviceType {
                    apartment_type: type_name.clone(),
                    device: device.clone(),
                });
            }
        }

        if def.count == 0 {
            warn!("apartment type '{type_name}' has count 0; no instances produced");
            continue;
        }

        for seq in 1..=def.count {
            let id = format!("{type_name}-{seq}");
            let mut devices = Vec::new();
            for device_type in drawing.devices.keys() {
                let per_apartment = def.devices.get(device_type).copied().unwrap_or(0);
                for device_seq in 1..=per_apartment {
                    devices.push(DeviceInstance {
                        device_type: device_type.clone(),
                        apartment_id: id.clone(),
                        seq: device_seq,
                    });
                }
            }
            apartments.push(ApartmentInstance {
                id,
                type_name: type_name.clone(),
                seq,
                rooms: def.rooms,
                devices,
            });
        }
    }

    Ok(apartments)
}
