//! Drawing configuration: geometry constants, layer colors, device
//! styles, and the device → switch mapping.
//!
//! Everything is validated eagerly at load time so the pipeline proper
//! never has to second-guess a lookup.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use crate::draw::lisp::KNOWN_ICONS;
use crate::error::ConfigError;

/// Layer housing the floor/level lines.
pub const LAYER_LEVELS: &str = "levels";
/// Layer housing switch footprints.
pub const LAYER_SWITCHES: &str = "switches";
/// Layer housing the UPS footprint and its power feed.
pub const LAYER_UPS: &str = "ups";
/// Layer housing identifying text.
pub const LAYER_LABELS: &str = "labels";
/// Layer housing UTP riser cabling.
pub const LAYER_UTP: &str = "utp";
/// Layer housing inter-tower fiber trays.
pub const LAYER_FIBER: &str = "fiber";

const STRUCTURAL_LAYERS: &[&str] = &[
    LAYER_LEVELS,
    LAYER_SWITCHES,
    LAYER_UPS,
    LAYER_LABELS,
    LAYER_UTP,
    LAYER_FIBER,
];

/// Named numeric constants driving coordinate placement.
///
/// `origin_x`/`origin_y` are free coordinates; every other field is a
/// spacing or size and must be strictly positive.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryConfig {
    pub origin_x: f64,
    pub origin_y: f64,
    /// Vertical distance between consecutive floor lines.
    pub level_spacing: f64,
    /// Horizontal extent of each floor line.
    pub floor_line_length: f64,
    /// Gap between one tower's floor line and the next tower's origin.
    pub tower_separation: f64,
    pub switch_width: f64,
    pub switch_height: f64,
    pub ups_width: f64,
    pub ups_height: f64,
    /// Horizontal pitch between device icons in an apartment run.
    pub device_spacing_x: f64,
    /// Vertical clearance of device icons above their floor line.
    pub device_spacing_y: f64,
    /// Horizontal inset of the first rack unit from the tower origin.
    pub rack_margin: f64,
    /// Vertical clearance of rack units above the reference line.
    pub rack_clearance: f64,
    /// Horizontal inset of the first apartment anchor from the tower origin.
    pub apartment_margin: f64,
    /// Horizontal pitch between apartment anchors on a floor.
    pub apartment_spacing: f64,
    /// Gap between the rightmost device and the first UTP riser trunk.
    pub riser_offset: f64,
    /// Horizontal pitch between UTP riser trunks.
    pub riser_spacing: f64,
    /// Vertical drop from the reference line to the first cable tray.
    pub tray_offset: f64,
    /// Vertical pitch between cable trays.
    pub tray_spacing: f64,
    pub label_height: f64,
    pub tower_label_height: f64,
    /// Vertical drop of the tower name below the reference line.
    pub tower_label_offset: f64,
}

impl GeometryConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let dims: [(&'static str, f64); 20] = [
            ("level_spacing", self.level_spacing),
            ("floor_line_length", self.floor_line_length),
            ("tower_separation", self.tower_separation),
            ("switch_width", self.switch_width),
            ("switch_height", self.switch_height),
            ("ups_width", self.ups_width),
            ("ups_height", self.ups_height),
            ("device_spacing_x", self.device_spacing_x),
            ("device_spacing_y", self.device_spacing_y),
            ("rack_margin", self.rack_margin),
            ("rack_clearance", self.rack_clearance),
            ("apartment_margin", self.apartment_margin),
            ("apartment_spacing", self.apartment_spacing),
            ("riser_offset", self.riser_offset),
            ("riser_spacing", self.riser_spacing),
            ("tray_offset", self.tray_offset),
            ("tray_spacing", self.tray_spacing),
            ("label_height", self.label_height),
            ("tower_label_height", self.tower_label_height),
            ("tower_label_offset", self.tower_label_offset),
        ];
        for (key, value) in dims {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveDimension { key, value });
            }
        }
        Ok(())
    }
}

/// How a device type is labelled and drawn.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceStyle {
    /// Short label used in count annotations and the device schedule.
    pub label: String,
    /// Glyph name resolved by the script dialect.
    pub icon: String,
    /// Layer the icon is drawn on.
    pub layer: String,
}

/// Capacity and draw-order rank of a switch type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchClass {
    /// Device ports one unit can serve before another unit is required.
    pub capacity: u32,
    /// Left-to-right placement rank at the reference level.
    pub rank: u32,
}

/// How apartments are dealt into towers.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerPolicy {
    /// All apartments in one tower.
    Single,
    /// Fixed apartment count per tower; a final partial tower takes the rest.
    PerTower(u32),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TowerConfig {
    pub policy: TowerPolicy,
    /// Apartments per floor; floor 0 is reserved for the rack.
    pub apartments_per_floor: u32,
}

/// The complete, validated drawing configuration.
///
/// All tables are order-preserving maps: the order device styles appear
/// in `devices` is the device draw order used for grouping icon runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrawingConfig {
    pub geometry: GeometryConfig,
    /// Layer name → CAD color index.
    pub layers: IndexMap<String, u16>,
    /// Device type → style. Table order is the device draw order.
    pub devices: IndexMap<String, DeviceStyle>,
    /// Device type → switch type.
    pub switch_mapping: IndexMap<String, String>,
    /// Switch type → capacity and draw-order rank.
    pub switches: IndexMap<String, SwitchClass>,
    pub towers: TowerConfig,
}

impl DrawingConfig {
    /// Loads, parses, and validates a drawing config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] / [`ConfigError::InvalidJson`]
    /// for I/O and schema problems, and the specific `ConfigError`
    /// variant for each consistency rule [`Self::validate`] enforces.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let content = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::FileRead {
            path: path_ref.to_path_buf(),
            source,
        })?;

        let config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::InvalidJson {
                path: path_ref.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Enforces every cross-table consistency rule:
    ///
    /// - all spacing/size constants strictly positive,
    /// - structural layers present in the layer table,
    /// - device styles reference known layers and known icons,
    /// - switch mappings target switch types with a draw-order entry,
    /// - switch capacities and tower counts strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;

        for layer in STRUCTURAL_LAYERS {
            if !self.layers.contains_key(*layer) {
                return Err(ConfigError::UnknownLayer {
                    layer: (*layer).to_string(),
                });
            }
        }

        for (device, style) in &self.devices {
            if !self.layers.contains_key(&style.layer) {
                return Err(ConfigError::UnknownLayer {
                    layer: style.layer.clone(),
                });
            }
            if !KNOWN_ICONS.contains(&style.icon.as_str()) {
                return Err(ConfigError::UnknownIcon {
                    device: device.clone(),
                    icon: style.icon.clone(),
                });
            }
        }

        for switch_type in self.switch_mapping.values() {
            if !self.switches.contains_key(switch_type) {
                return Err(ConfigError::UnorderedSwitchType {
                    switch: switch_type.clone(),
                });
            }
        }

        // Rank ties are allowed; they resolve by table order.
        for class in self.switches.values() {
            if class.capacity == 0 {
                return Err(ConfigError::NonPositiveDimension {
                    key: "switches.capacity",
                    value: 0.0,
                });
            }
        }

        if self.towers.apartments_per_floor == 0 {
            return Err(ConfigError::NonPositiveDimension {
                key: "towers.apartments_per_floor",
                value: 0.0,
            });
        }
        if let TowerPolicy::PerTower(0) = self.towers.policy {
            return Err(ConfigError::NonPositiveDimension {
                key: "towers.policy.per_tower",
                value: 0.0,
            });
        }

        Ok(())
    }

    /// Resolves a layer name to its color index.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownLayer`] for a name absent from the
    /// layer table.
    pub fn layer_color(&self, layer: &str) -> Result<u16, ConfigError> {
        self.layers
            .get(layer)
            .copied()
            .ok_or_else(|| ConfigError::UnknownLayer {
                layer: layer.to_string(),
            })
    }
}

#[cfg(test)]
pub(crate) fn sample_config() -> DrawingConfig {
    let config: DrawingConfig = serde_json::from_str(
        r#"{
        "geometry": {
            "origin_x": 0.0, "origin_y": 0.0,
            "level_spacing": 400.0, "floor_line_length": 2000.0,
            "tower_separation": 600.0,
            "switch_width": 120.0, "switch_height": 60.0,
            "ups_width": 120.0, "ups_height": 80.0,
            "device_spacing_x": 80.0, "device_spacing_y": 40.0,
            "rack_margin": 50.0, "rack_clearance": 40.0,
            "apartment_margin": 150.0, "apartment_spacing": 300.0,
            "riser_offset": 50.0, "riser_spacing": 30.0,
            "tray_offset": 120.0, "tray_spacing": 40.0,
            "label_height": 10.0, "tower_label_height": 25.0,
            "tower_label_offset": 60.0
        },
        "layers": {
            "levels": 8, "switches": 4, "ups": 1, "labels": 7,
            "utp": 5, "fiber": 2,
            "aps": 3, "phones": 6, "tvs": 30
        },
        "devices": {
            "ap":    { "label": "AP",  "icon": "access_point", "layer": "aps" },
            "phone": { "label": "TEL", "icon": "handset",      "layer": "phones" },
            "tv":    { "label": "TV",  "icon": "display",      "layer": "tvs" }
        },
        "switch_mapping": { "ap": "SW-WIFI", "phone": "SW-TEL", "tv": "SW-IPTV" },
        "switches": {
            "SW-WIFI": { "capacity": 24, "rank": 0 },
            "SW-TEL":  { "capacity": 24, "rank": 1 },
            "SW-IPTV": { "capacity": 24, "rank": 2 }
        },
        "towers": { "policy": "single", "apartments_per_floor": 4 }
    }"#,
    )
    .unwrap();
    config.validate().unwrap();
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sample_is_valid() {
        let config = sample_config();
        assert_eq!(config.layer_color("levels").unwrap(), 8);
        assert_eq!(config.devices.len(), 3);
    }

    #[test]
    fn rejects_non_positive_spacing() {
        let mut config = sample_config();
        config.geometry.tower_separation = 0.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositiveDimension {
                key: "tower_separation",
                ..
            }
        ));
    }

    #[test]
    fn rejects_style_on_missing_layer() {
        let mut config = sample_config();
        config.devices.get_mut("ap").unwrap().layer = "ghost".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLayer { layer } if layer == "ghost"));
    }

    #[test]
    fn rejects_unknown_icon() {
        let mut config = sample_config();
        config.devices.get_mut("tv").unwrap().icon = "hologram".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownIcon { icon, .. } if icon == "hologram"));
    }

    #[test]
    fn rejects_mapping_to_unranked_switch() {
        let mut config = sample_config();
        config
            .switch_mapping
            .insert("camera".to_string(), "SW-CCTV".to_string());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnorderedSwitchType { switch } if switch == "SW-CCTV"));
    }

    #[test]
    fn unknown_layer_lookup_fails() {
        let config = sample_config();
        assert!(config.layer_color("basement").is_err());
    }
}
