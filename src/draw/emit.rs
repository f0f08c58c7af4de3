//! Walks the positioned-entity graph and emits the ordered drawing
//! command sequence.
//!
//! Emission order is fixed: per tower — name label, rack footprints,
//! floors bottom to top with their apartments left to right; then the
//! cabling passes (UTP risers, inter-tower fiber trays, UPS power
//! feed). The sequence is append-only.

use crate::config::drawing::{
    DrawingConfig, LAYER_FIBER, LAYER_LABELS, LAYER_LEVELS, LAYER_SWITCHES, LAYER_UPS, LAYER_UTP,
};
use crate::draw::command::{DrawCommand, Justify};
use crate::error::ConfigError;
use crate::plan::layout::{PlacedApartment, PlacedSwitch, PlacedTower, SitePlan};
use crate::plan::LayoutPoint;

/// Cable designation used on UTP riser count labels.
const UTP_CABLE: &str = "CAT6A";

/// Emits the full drawing command sequence for a positioned site.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownLayer`] if any command resolves a
/// layer absent from the layer table, and the resolver's mapping errors
/// if a placed device type has lost its style or switch mapping.
pub fn emit(plan: &SitePlan, config: &DrawingConfig) -> Result<Vec<DrawCommand>, ConfigError> {
    let mut emitter = Emitter {
        config,
        commands: Vec::new(),
    };

    for tower in &plan.towers {
        emitter.tower(tower)?;
    }
    for tower in &plan.towers {
        emitter.utp_risers(tower)?;
    }
    emitter.fiber_trays(plan)?;
    emitter.ups_feed(plan)?;

    Ok(emitter.commands)
}

struct Emitter<'a> {
    config: &'a DrawingConfig,
    commands: Vec<DrawCommand>,
}

impl Emitter<'_> {
    fn tower(&mut self, tower: &PlacedTower) -> Result<(), ConfigError> {
        let config = self.config;
        let g = &config.geometry;

        self.label(
            LAYER_LABELS,
            tower.label_at,
            g.tower_label_height,
            Justify::Center,
            tower.name.clone(),
        )?;

        for rack in &tower.racks {
            let opposite =
                LayoutPoint::new(rack.at.x + g.switch_width, rack.at.y + g.switch_height);
            self.rect(LAYER_SWITCHES, rack.at, opposite)?;
            let center = LayoutPoint::new(
                rack.at.x + g.switch_width / 2.0,
                rack.at.y + g.switch_height / 2.0,
            );
            let unit = &rack.unit;
            self.label(
                LAYER_LABELS,
                center,
                g.label_height,
                Justify::MiddleCenter,
                format!(
                    "{}-{} {}/{}",
                    unit.switch_type, unit.unit, unit.load, unit.capacity
                ),
            )?;
        }

        if let Some(ups_at) = tower.ups_at {
            let opposite = LayoutPoint::new(ups_at.x + g.ups_width, ups_at.y + g.ups_height);
            self.rect(LAYER_UPS, ups_at, opposite)?;
            self.label(
                LAYER_LABELS,
                LayoutPoint::new(ups_at.x + g.ups_width / 2.0, ups_at.y + g.ups_height / 2.0),
                g.label_height,
                Justify::MiddleCenter,
                "UPS".to_string(),
            )?;
        }

        for floor in &tower.floors {
            self.line(LAYER_LEVELS, floor.line_from, floor.line_to)?;
            self.label(
                LAYER_LABELS,
                LayoutPoint::new(floor.line_from.x, floor.line_from.y + g.label_height / 2.0),
                g.label_height,
                Justify::Left,
                floor.name.clone(),
            )?;
            for apartment in &floor.apartments {
                self.apartment(apartment)?;
            }
        }

        Ok(())
    }

    fn apartment(&mut self, apartment: &PlacedApartment) -> Result<(), ConfigError> {
        let config = self.config;
        let g = &config.geometry;

        self.label(
            LAYER_LABELS,
            LayoutPoint::new(apartment.anchor.x, apartment.anchor.y - g.label_height),
            g.label_height,
            Justify::Left,
            apartment.id.clone(),
        )?;

        for group in apartment
            .devices
            .chunk_by(|a, b| a.device_type == b.device_type)
        {
            let style = config.devices.get(&group[0].device_type).ok_or_else(|| {
                ConfigError::UnknownDeviceType {
                    apartment_type: apartment.type_name.clone(),
                    device: group[0].device_type.clone(),
                }
            })?;

            for device in group {
                self.icon(&style.layer, &style.icon, device.at)?;
            }

            let first = group[0].at;
            self.label(
                LAYER_LABELS,
                LayoutPoint::new(
                    first.x - g.device_spacing_x / 2.0,
                    first.y + g.device_spacing_y / 2.0,
                ),
                g.label_height,
                Justify::Center,
                format!("{}x{}", group.len(), style.label),
            )?;
        }

        Ok(())
    }

    /// One vertical UTP trunk per device type with demand, fed from the
    /// first rack unit of the mapped switch type, tapping every floor
    /// that houses the type.
    fn utp_risers(&mut self, tower: &PlacedTower) -> Result<(), ConfigError> {
        let config = self.config;
        let g = &config.geometry;

        let max_device_x = tower
            .floors
            .iter()
            .flat_map(|f| f.apartments.iter())
            .flat_map(|a| a.devices.iter())
            .map(|d| d.at.x)
            .fold(f64::NEG_INFINITY, f64::max);
        if !max_device_x.is_finite() {
            return Ok(());
        }

        let mut trunk_x = max_device_x + g.riser_offset;
        for device_type in config.devices.keys() {
            // One tap per floor housing this type: (tap y, rightmost x).
            let mut taps: Vec<(f64, f64)> = Vec::new();
            let mut total = 0usize;
            for floor in &tower.floors {
                let xs: Vec<f64> = floor
                    .apartments
                    .iter()
                    .flat_map(|a| a.devices.iter())
                    .filter(|d| d.device_type == *device_type)
                    .map(|d| d.at.x)
                    .collect();
                if xs.is_empty() {
                    continue;
                }
                total += xs.len();
                let right = xs.iter().fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
                taps.push((floor.line_from.y + g.device_spacing_y, right));
            }
            if taps.is_empty() {
                continue;
            }

            let switch_type = config.switch_mapping.get(device_type).ok_or_else(|| {
                ConfigError::UnmappedDeviceType {
                    device: device_type.clone(),
                }
            })?;
            let Some(rack) = tower.rack_for(switch_type) else {
                continue;
            };

            let side = LayoutPoint::new(
                rack.at.x + g.switch_width,
                rack.at.y + g.switch_height / 2.0,
            );
            self.line(LAYER_UTP, side, LayoutPoint::new(trunk_x, side.y))?;

            let top_y = taps.iter().map(|t| t.0).fold(side.y, f64::max);
            self.line(
                LAYER_UTP,
                LayoutPoint::new(trunk_x, side.y),
                LayoutPoint::new(trunk_x, top_y),
            )?;
            for (tap_y, right) in taps {
                self.line(
                    LAYER_UTP,
                    LayoutPoint::new(trunk_x, tap_y),
                    LayoutPoint::new(right, tap_y),
                )?;
            }

            self.label(
                LAYER_LABELS,
                LayoutPoint::new(side.x + g.riser_offset / 2.0, side.y + g.label_height / 2.0),
                g.label_height,
                Justify::Center,
                format!("{total}x{UTP_CABLE}"),
            )?;

            trunk_x += g.riser_spacing;
        }

        Ok(())
    }

    /// One tray per switch type present in at least two towers, run
    /// below the reference level, with a descending fiber count label
    /// on each span. Tray slot 0 is reserved for the UPS feed.
    fn fiber_trays(&mut self, plan: &SitePlan) -> Result<(), ConfigError> {
        if plan.towers.len() < 2 {
            return Ok(());
        }
        let config = self.config;
        let g = &config.geometry;

        let mut types: Vec<(&String, u32)> = config
            .switches
            .iter()
            .map(|(switch_type, class)| (switch_type, class.rank))
            .collect();
        types.sort_by_key(|(_, rank)| *rank);

        let mut slot = 1u32;
        for (switch_type, _) in types {
            let stops: Vec<&PlacedSwitch> = plan
                .towers
                .iter()
                .filter_map(|t| t.rack_for(switch_type))
                .collect();
            if stops.len() < 2 {
                continue;
            }

            let tray_y = g.origin_y - g.tray_offset - f64::from(slot) * g.tray_spacing;
            slot += 1;

            let drop_of = |rack: &PlacedSwitch| {
                LayoutPoint::new(rack.at.x + g.switch_width / 2.0, rack.at.y)
            };
            let short = switch_type.strip_prefix("SW-").unwrap_or(switch_type);

            let source = drop_of(stops[0]);
            self.line(LAYER_FIBER, source, LayoutPoint::new(source.x, tray_y))?;

            let mut prev_x = source.x;
            let mut remaining = stops.len() - 1;
            for stop in &stops[1..] {
                let dest = drop_of(stop);
                self.line(
                    LAYER_FIBER,
                    LayoutPoint::new(prev_x, tray_y),
                    LayoutPoint::new(dest.x, tray_y),
                )?;
                self.label(
                    LAYER_LABELS,
                    LayoutPoint::new((prev_x + dest.x) / 2.0, tray_y + g.label_height / 2.0),
                    g.label_height,
                    Justify::Center,
                    format!("{remaining}xFO {short}"),
                )?;
                self.line(LAYER_FIBER, LayoutPoint::new(dest.x, tray_y), dest)?;
                prev_x = dest.x;
                remaining -= 1;
            }
        }

        Ok(())
    }

    /// Power feed from the UPS to every switch across all towers,
    /// along the topmost cable tray.
    fn ups_feed(&mut self, plan: &SitePlan) -> Result<(), ConfigError> {
        let config = self.config;
        let g = &config.geometry;
        let Some(first) = plan.towers.first() else {
            return Ok(());
        };
        let Some(ups_at) = first.ups_at else {
            return Ok(());
        };

        let tray_y = g.origin_y - g.tray_offset;
        let feed = LayoutPoint::new(ups_at.x + g.ups_width / 2.0, ups_at.y);
        self.line(LAYER_UPS, feed, LayoutPoint::new(feed.x, tray_y))?;

        let mut stops: Vec<LayoutPoint> = plan
            .towers
            .iter()
            .flat_map(|t| t.racks.iter())
            .map(|r| LayoutPoint::new(r.at.x + g.switch_width / 2.0, r.at.y))
            .collect();
        stops.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut prev_x = feed.x;
        let mut remaining = stops.len();
        for stop in stops {
            self.line(
                LAYER_UPS,
                LayoutPoint::new(prev_x, tray_y),
                LayoutPoint::new(stop.x, tray_y),
            )?;
            self.label(
                LAYER_LABELS,
                LayoutPoint::new((prev_x + stop.x) / 2.0, tray_y + g.label_height / 2.0),
                g.label_height,
                Justify::Center,
                format!("{remaining}xUPS-PWR"),
            )?;
            self.line(LAYER_UPS, LayoutPoint::new(stop.x, tray_y), stop)?;
            prev_x = stop.x;
            remaining -= 1;
        }

        Ok(())
    }

    fn line(&mut self, layer: &str, from: LayoutPoint, to: LayoutPoint) -> Result<(), ConfigError> {
        let color = self.config.layer_color(layer)?;
        self.commands.push(DrawCommand::Line {
            layer: layer.to_string(),
            color,
            from,
            to,
        });
        Ok(())
    }

    fn rect(
        &mut self,
        layer: &str,
        corner: LayoutPoint,
        opposite: LayoutPoint,
    ) -> Result<(), ConfigError> {
        let color = self.config.layer_color(layer)?;
        self.commands.push(DrawCommand::Rectangle {
            layer: layer.to_string(),
            color,
            corner,
            opposite,
        });
        Ok(())
    }

    fn label(
        &mut self,
        layer: &str,
        at: LayoutPoint,
        height: f64,
        justify: Justify,
        text: String,
    ) -> Result<(), ConfigError> {
        let color = self.config.layer_color(layer)?;
        self.commands.push(DrawCommand::Label {
            layer: layer.to_string(),
            color,
            at,
            height,
            justify,
            text,
        });
        Ok(())
    }

    fn icon(&mut self, layer: &str, icon: &str, at: LayoutPoint) -> Result<(), ConfigError> {
        let color = self.config.layer_color(layer)?;
        self.commands.push(DrawCommand::IconRef {
            layer: layer.to_string(),
            color,
            icon: icon.to_string(),
            at,
        });
        Ok(())
    }
}
