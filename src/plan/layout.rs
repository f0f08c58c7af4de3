//! Coordinate placement: towers, floors, racks, apartments, and
//! devices become a positioned-entity graph.
//!
//! Placement is a pure function of the tower list and the geometry
//! config; identical input always yields identical coordinates.

use serde::Serialize;

use crate::config::DrawingConfig;
use crate::model::{SwitchUnit, Tower};

/// A resolved coordinate in drawing space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The fully positioned site: every placed entity owns one point.
#[derive(Debug, Clone, Serialize)]
pub struct SitePlan {
    pub towers: Vec<PlacedTower>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedTower {
    pub name: String,
    /// Left end of the reference level.
    pub origin: LayoutPoint,
    pub label_at: LayoutPoint,
    /// Rack units in draw order, left to right.
    pub racks: Vec<PlacedSwitch>,
    /// Bottom-left corner of the UPS footprint, first tower only.
    pub ups_at: Option<LayoutPoint>,
    /// Floors bottom to top, reference level first.
    pub floors: Vec<PlacedFloor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedSwitch {
    pub unit: SwitchUnit,
    /// Bottom-left corner of the footprint.
    pub at: LayoutPoint,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedFloor {
    pub index: usize,
    pub name: String,
    pub line_from: LayoutPoint,
    pub line_to: LayoutPoint,
    pub apartments: Vec<PlacedApartment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedApartment {
    pub id: String,
    pub type_name: String,
    /// Left end of the device run, on the floor line.
    pub anchor: LayoutPoint,
    pub devices: Vec<PlacedDevice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedDevice {
    pub device_type: String,
    pub at: LayoutPoint,
}

impl PlacedTower {
    /// The first rack unit serving the given switch type, if any.
    #[must_use]
    pub fn rack_for(&self, switch_type: &str) -> Option<&PlacedSwitch> {
        self.racks
            .iter()
            .find(|r| r.unit.switch_type == switch_type)
    }
}

/// Assigns a coordinate to every entity.
///
/// Towers run left to right from the configured origin; each tower
/// advances by the floor-line length plus the tower separation. Floors
/// stack upward by the level spacing, reference level at the origin Y.
/// Rack units sit on the reference level in draw order; apartments and
/// their device runs sit on their floor line, grouped left to right.
#[must_use]
pub fn layout(towers: &[Tower], config: &DrawingConfig) -> SitePlan {
    let g = &config.geometry;
    let placed = towers
        .iter()
        .map(|tower| {
            let tower_x =
                g.origin_x + tower.index as f64 * (g.floor_line_length + g.tower_separation);
            place_tower(tower, tower_x, config)
        })
        .collect();
    SitePlan { towers: placed }
}

fn place_tower(tower: &Tower, tower_x: f64, config: &DrawingConfig) -> PlacedTower {
    let g = &config.geometry;
    let origin = LayoutPoint::new(tower_x, g.origin_y);

    // Rack: switches in draw order, then the UPS, all on the reference
    // level with a fixed clearance.
    let rack_y = g.origin_y + g.rack_clearance;
    let mut rack_x = tower_x + g.rack_margin;
    let mut racks = Vec::with_capacity(tower.switches.len());
    for unit in &tower.switches {
        racks.push(PlacedSwitch {
            unit: unit.clone(),
            at: LayoutPoint::new(rack_x, rack_y),
        });
        rack_x += g.switch_width + g.device_spacing_x;
    }
    let ups_at = tower
        .ups
        .map(|_| LayoutPoint::new(rack_x, rack_y));

    let floors = tower
        .floors
        .iter()
        .map(|floor| {
            let y = g.origin_y + floor.index as f64 * g.level_spacing;
            let apartments = floor
                .apartments
                .iter()
                .enumerate()
                .map(|(slot, apartment)| {
                    let anchor_x =
                        tower_x + g.apartment_margin + slot as f64 * g.apartment_spacing;
                    let anchor = LayoutPoint::new(anchor_x, y);
                    let devices = apartment
                        .devices
                        .iter()
                        .enumerate()
                        .map(|(k, device)| PlacedDevice {
                            device_type: device.device_type.clone(),
                            at: LayoutPoint::new(
                                anchor.x + k as f64 * g.device_spacing_x,
                                y + g.device_spacing_y,
                            ),
                        })
                        .collect();
                    PlacedApartment {
                        id: apartment.id.clone(),
                        type_name: apartment.type_name.clone(),
                        anchor,
                        devices,
                    }
                })
                .collect();
            PlacedFloor {
                index: floor.index,
                name: floor.name.clone(),
                line_from: LayoutPoint::new(tower_x, y),
                line_to: LayoutPoint::new(tower_x + g.floor_line_length, y),
                apartments,
            }
        })
        .collect();

    PlacedTower {
        name: tower.name.clone(),
        origin,
        label_at: LayoutPoint::new(tower_x, g.origin_y - g.tower_label_offset),
        racks,
        ups_at,
        floors,
    }
}
