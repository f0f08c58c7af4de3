//! Switch resolution: device demand per tower becomes a rack of
//! switch units ordered by the configured draw order.

use indexmap::IndexMap;
use log::info;

use crate::config::DrawingConfig;
use crate::error::ConfigError;
use crate::model::{SwitchUnit, Tower};

/// Resolves switch units for every tower in place.
///
/// # Errors
///
/// Returns [`ConfigError::UnmappedDeviceType`] for demand from a
/// device type absent from the switch mapping, and
/// [`ConfigError::UnorderedSwitchType`] for a mapped switch type with
/// no draw-order entry.
pub fn assign_switches(towers: &mut [Tower], config: &DrawingConfig) -> Result<(), ConfigError> {
    for tower in towers {
        tower.switches = resolve_tower(tower, config)?;
        info!(
            "tower {}: {} switch unit(s) for {} apartment(s)",
            tower.name,
            tower.switches.len(),
            tower.apartment_count()
        );
    }
    Ok(())
}

/// Computes the ordered switch-unit list for one tower.
///
/// Demand per switch type is the sum of the tower's device counts over
/// the mapped device types. Unit count is `ceil(demand / capacity)`,
/// so any nonzero demand yields at least one unit. Units fill to
/// capacity; the last unit carries the remainder. Types are ordered by
/// ascending rank, ties by first-demand order.
fn resolve_tower(tower: &Tower, config: &DrawingConfig) -> Result<Vec<SwitchUnit>, ConfigError> {
    let mut demand: IndexMap<String, u32> = IndexMap::new();

    for (device_type, count) in tower.device_totals() {
        let switch_type = config.switch_mapping.get(&device_type).ok_or_else(|| {
            ConfigError::UnmappedDeviceType {
                device: device_type.clone(),
            }
        })?;
        if !config.switches.contains_key(switch_type) {
            return Err(ConfigError::UnorderedSwitchType {
                switch: switch_type.clone(),
            });
        }
        *demand.entry(switch_type.clone()).or_insert(0) += count;
    }

    let mut ordered: Vec<(String, u32)> = demand.into_iter().filter(|(_, n)| *n > 0).collect();
    ordered.sort_by_key(|(switch_type, _)| config.switches[switch_type].rank);

    let mut units = Vec::new();
    for (switch_type, total) in ordered {
        let class = &config.switches[&switch_type];
        let needed = total.div_ceil(class.capacity);
        for unit in 1..=needed {
            let load = if unit == needed {
                total - class.capacity * (needed - 1)
            } else {
                class.capacity
            };
            units.push(SwitchUnit {
                switch_type: switch_type.clone(),
                unit,
                rank: class.rank,
                capacity: class.capacity,
                load,
            });
        }
    }

    Ok(units)
}
