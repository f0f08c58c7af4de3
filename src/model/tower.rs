use indexmap::IndexMap;
use serde::Serialize;

use super::ApartmentInstance;

/// An ordered grouping of apartments with its own rack of switches.
///
/// The first tower is named `MDF` and houses the UPS; subsequent
/// towers are `IDF1`, `IDF2`, …
#[derive(Debug, Clone, Serialize)]
pub struct Tower {
    pub name: String,
    /// 0-based position in the left-to-right tower order.
    pub index: usize,
    /// Floors in vertical order; index 0 is the reference level and
    /// never houses apartments.
    pub floors: Vec<Floor>,
    /// Switch units in draw order, filled in by the switch resolver.
    pub switches: Vec<SwitchUnit>,
    pub ups: Option<UpsUnit>,
}

/// One floor of a tower.
#[derive(Debug, Clone, Serialize)]
pub struct Floor {
    /// Vertical index within the tower; 0 is the reference level.
    pub index: usize,
    pub name: String,
    pub apartments: Vec<ApartmentInstance>,
}

/// One switch unit at the reference level.
#[derive(Debug, Clone, Serialize)]
pub struct SwitchUnit {
    pub switch_type: String,
    /// 1-based unit number within the switch type.
    pub unit: u32,
    /// Left-to-right placement rank from the drawing config.
    pub rank: u32,
    pub capacity: u32,
    /// Devices assigned to this unit.
    pub load: u32,
}

/// The single UPS, housed in the first tower.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpsUnit;

impl Tower {
    /// Total apartments across all floors.
    #[must_use]
    pub fn apartment_count(&self) -> usize {
        self.floors.iter().map(|f| f.apartments.len()).sum()
    }

    /// Aggregated device counts by type, in the order device types
    /// first appear across the tower's apartments.
    #[must_use]
    pub fn device_totals(&self) -> IndexMap<String, u32> {
        let mut totals: IndexMap<String, u32> = IndexMap::new();
        for floor in &self.floors {
            for apartment in &floor.apartments {
                for device in &apartment.devices {
                    *totals.entry(device.device_type.clone()).or_insert(0) += 1;
                }
            }
        }
        totals
    }
}
