//! Deals expanded apartments into towers and floors under the
//! configured policy.

use crate::config::{DrawingConfig, TowerPolicy};
use crate::model::{ApartmentInstance, Floor, Tower, UpsUnit};

/// Reference-level name; the level housing the rack and the UPS.
pub const REFERENCE_FLOOR: &str = "MDF";

/// Builds the ordered tower list from the expanded apartments.
///
/// Apartments keep their expansion order: they fill the first tower's
/// floors bottom-up before spilling into the next. Floor 0 is the
/// reference level and stays empty; apartments start on floor 1, at
/// most `apartments_per_floor` each. With no apartments at all, a
/// single tower with only its reference level is produced. The UPS is
/// attached to the first tower.
#[must_use]
pub fn build_towers(apartments: Vec<ApartmentInstance>, config: &DrawingConfig) -> Vec<Tower> {
    let per_tower = match config.towers.policy {
        TowerPolicy::Single => apartments.len().max(1),
        TowerPolicy::PerTower(n) => n as usize,
    };
    let per_floor = config.towers.apartments_per_floor as usize;

    let mut towers: Vec<Tower> = Vec::new();
    let mut groups: Vec<Vec<ApartmentInstance>> = Vec::new();

    if apartments.is_empty() {
        groups.push(Vec::new());
    } else {
        let mut apartments = apartments.into_iter().peekable();
        while apartments.peek().is_some() {
            groups.push(apartments.by_ref().take(per_tower).collect());
        }
    }

    for (index, group) in groups.into_iter().enumerate() {
        let name = if index == 0 {
            "MDF".to_string()
        } else {
            format!("IDF{index}")
        };

        let mut floors = vec![Floor {
            index: 0,
            name: REFERENCE_FLOOR.to_string(),
            apartments: Vec::new(),
        }];
        let mut group = group.into_iter().peekable();
        let mut floor_index = 1;
        while group.peek().is_some() {
            floors.push(Floor {
                index: floor_index,
                name: format!("LEVEL{floor_index}"),
                apartments: group.by_ref().take(per_floor).collect(),
            });
            floor_index += 1;
        }

        towers.push(Tower {
            name,
            index,
            floors,
            switches: Vec::new(),
            ups: (index == 0).then_some(UpsUnit),
        });
    }

    towers
}
