//! Bill of materials: device and switch totals for the whole site.
//!
//! Plain text, deterministic — no timestamps, so re-running on the
//! same input produces a byte-identical file.

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use indexmap::IndexMap;

use crate::config::DrawingConfig;
use crate::error::ExportError;
use crate::model::Tower;

/// Estimated UTP meters per network point, site-survey rule of thumb.
const UTP_METERS_PER_POINT: u32 = 15;
/// Estimated fiber meters per inter-tower run.
const FIBER_METERS_PER_RUN: u32 = 50;

pub fn write_bom<P: AsRef<Path>>(
    towers: &[Tower],
    config: &DrawingConfig,
    path: P,
) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(render(towers, config).as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}

fn render(towers: &[Tower], config: &DrawingConfig) -> String {
    let mut device_totals: IndexMap<&str, u32> = config
        .devices
        .keys()
        .map(|k| (k.as_str(), 0))
        .collect();
    let mut switch_totals: IndexMap<&str, u32> = IndexMap::new();

    for tower in towers {
        for (device_type, count) in tower.device_totals() {
            if let Some(total) = device_totals.get_mut(device_type.as_str()) {
                *total += count;
            }
        }
        for unit in &tower.switches {
            *switch_totals.entry(unit.switch_type.as_str()).or_insert(0) += 1;
        }
    }

    let total_points: u32 = device_totals.values().sum();
    let total_apartments: usize = towers.iter().map(Tower::apartment_count).sum();
    let utp_meters = total_points * UTP_METERS_PER_POINT;
    let fiber_runs = towers.len().saturating_sub(1) * config.switches.len();
    let fiber_meters = fiber_runs as u32 * FIBER_METERS_PER_RUN;

    let mut out = String::new();
    let rule = "=".repeat(60);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "              BILL OF MATERIALS - NETWORK RISER");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(out, "--- PROJECT SUMMARY ---");
    let _ = writeln!(out, "Towers (MDF+IDF):   {}", towers.len());
    let _ = writeln!(out, "Apartments:         {total_apartments}");
    let _ = writeln!(out, "Network points:     {total_points}");
    let _ = writeln!(out);
    let _ = writeln!(out, "--- DEVICE TOTALS ---");
    for (device_type, total) in &device_totals {
        let label = config
            .devices
            .get(*device_type)
            .map_or(*device_type, |style| style.label.as_str());
        let _ = writeln!(out, "- {label:<10}: {total} units");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "--- SWITCH UNITS BY TYPE ---");
    for (switch_type, total) in &switch_totals {
        let _ = writeln!(out, "- {switch_type:<15}: {total} units");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "--- CABLING ESTIMATE ---");
    let _ = writeln!(out, "- UTP CAT6A: ~{utp_meters} meters");
    let _ = writeln!(out, "- Fiber:     ~{fiber_meters} meters (rough estimate)");
    let _ = writeln!(out);
    let _ = writeln!(out, "--- NOTES ---");
    let _ = writeln!(out, "- Quantities derive from the census input.");
    let _ = writeln!(out, "- Cable lengths are estimates; verify on site.");
    let _ = writeln!(out, "- One central UPS in the MDF.");
    let _ = writeln!(out, "{rule}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::drawing::sample_config;
    use crate::config::CensusConfig;
    use crate::plan::{assign_switches, build_towers, expand_census};
    use pretty_assertions::assert_eq;

    fn towers_for(census_json: &str) -> (Vec<Tower>, DrawingConfig) {
        let config = sample_config();
        let census: CensusConfig = serde_json::from_str(census_json).unwrap();
        let apartments = expand_census(&census, &config).unwrap();
        let mut towers = build_towers(apartments, &config);
        assign_switches(&mut towers, &config).unwrap();
        (towers, config)
    }

    #[test]
    fn totals_follow_the_census() {
        let (towers, config) = towers_for(
            r#"{ "2B": { "count": 3, "rooms": 2, "devices": { "ap": 2, "tv": 1 } } }"#,
        );
        let text = render(&towers, &config);
        assert!(text.contains("Apartments:         3"));
        assert!(text.contains("Network points:     9"));
        assert!(text.contains("- AP        : 6 units"));
        assert!(text.contains("- SW-WIFI        : 1 units"));
        assert!(text.contains(&format!("~{} meters", 9 * UTP_METERS_PER_POINT)));
    }

    #[test]
    fn render_is_deterministic() {
        let (towers, config) = towers_for(
            r#"{ "1B": { "count": 2, "rooms": 1, "devices": { "phone": 1 } } }"#,
        );
        assert_eq!(render(&towers, &config), render(&towers, &config));
    }
}
