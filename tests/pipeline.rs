//! End-to-end pipeline tests: load real config files, run the whole
//! chain, and check the cross-component invariants.

use std::fs;
use std::path::PathBuf;

use riser_gen::config::{CensusConfig, DrawingConfig};
use riser_gen::draw::{emit, render_script};
use riser_gen::error::ConfigError;
use riser_gen::export::{write_bom, write_schedule};
use riser_gen::plan::{assign_switches, build_towers, expand_census, layout};

const DRAWING_JSON: &str = r#"{
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
    "towers": { "policy": { "per_tower": 8 }, "apartments_per_floor": 4 }
}"#;

const CENSUS_JSON: &str = r#"{
    "1H": { "count": 4,  "rooms": 1, "devices": { "phone": 1, "ap": 2, "tv": 2 } },
    "2H": { "count": 10, "rooms": 2, "devices": { "phone": 1, "ap": 2, "tv": 3 } },
    "3H": { "count": 5,  "rooms": 3, "devices": { "phone": 1, "ap": 2, "tv": 4 } }
}"#;

struct Fixture {
    census: CensusConfig,
    drawing: DrawingConfig,
    _dir: tempfile::TempDir,
    dir: PathBuf,
}

fn fixture(census_json: &str, drawing_json: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let census_path = dir.path().join("census.json");
    let drawing_path = dir.path().join("drawing.json");
    fs::write(&census_path, census_json).unwrap();
    fs::write(&drawing_path, drawing_json).unwrap();

    let drawing = DrawingConfig::load(&drawing_path).unwrap();
    let census = CensusConfig::load(&census_path).unwrap();
    census.validate_against(&drawing).unwrap();

    let path = dir.path().to_path_buf();
    Fixture {
        census,
        drawing,
        _dir: dir,
        dir: path,
    }
}

fn artifacts(f: &Fixture) -> (String, Vec<u8>, Vec<u8>) {
    let apartments = expand_census(&f.census, &f.drawing).unwrap();
    let mut towers = build_towers(apartments.clone(), &f.drawing);
    assign_switches(&mut towers, &f.drawing).unwrap();
    let plan = layout(&towers, &f.drawing);
    let commands = emit(&plan, &f.drawing).unwrap();
    let script = render_script(&commands, &f.drawing);

    let csv_path = f.dir.join("schedule.csv");
    let bom_path = f.dir.join("bom.txt");
    write_schedule(&apartments, &f.drawing, &csv_path).unwrap();
    write_bom(&towers, &f.drawing, &bom_path).unwrap();

    (
        script,
        fs::read(&csv_path).unwrap(),
        fs::read(&bom_path).unwrap(),
    )
}

#[test]
fn expansion_matches_census_sums() {
    let f = fixture(CENSUS_JSON, DRAWING_JSON);
    let apartments = expand_census(&f.census, &f.drawing).unwrap();
    assert_eq!(apartments.len(), 19);

    let aps: usize = apartments
        .iter()
        .flat_map(|a| a.devices.iter())
        .filter(|d| d.device_type == "ap")
        .count();
    assert_eq!(aps, 4 * 2 + 10 * 2 + 5 * 2);
}

#[test]
fn all_apartments_are_placed_and_switch_loads_balance() {
    let f = fixture(CENSUS_JSON, DRAWING_JSON);
    let apartments = expand_census(&f.census, &f.drawing).unwrap();
    let mut towers = build_towers(apartments.clone(), &f.drawing);
    assign_switches(&mut towers, &f.drawing).unwrap();

    let placed: usize = towers.iter().map(|t| t.apartment_count()).sum();
    assert_eq!(placed, apartments.len());

    for tower in &towers {
        for (device_type, total) in tower.device_totals() {
            let switch_type = &f.drawing.switch_mapping[&device_type];
            let assigned: u32 = tower
                .switches
                .iter()
                .filter(|u| u.switch_type == *switch_type)
                .map(|u| u.load)
                .sum();
            assert_eq!(
                assigned, total,
                "load mismatch for {device_type} in {}",
                tower.name
            );
        }
    }
}

#[test]
fn switch_units_follow_ceil_of_demand_over_capacity() {
    let f = fixture(CENSUS_JSON, DRAWING_JSON);
    let apartments = expand_census(&f.census, &f.drawing).unwrap();
    let mut towers = build_towers(apartments, &f.drawing);
    assign_switches(&mut towers, &f.drawing).unwrap();

    for tower in &towers {
        for (device_type, total) in tower.device_totals() {
            let switch_type = &f.drawing.switch_mapping[&device_type];
            let capacity = f.drawing.switches[switch_type].capacity;
            let units = tower
                .switches
                .iter()
                .filter(|u| u.switch_type == *switch_type)
                .count() as u32;
            assert_eq!(units, total.div_ceil(capacity));
        }
    }
}

#[test]
fn two_small_apartments_need_one_wifi_switch() {
    // Worked example: 2 apartments with one AP each against capacity 24.
    let f = fixture(
        r#"{ "1H": { "count": 2, "rooms": 1,
             "devices": { "phone": 1, "ap": 1, "tv": 1 } } }"#,
        DRAWING_JSON,
    );
    let apartments = expand_census(&f.census, &f.drawing).unwrap();
    assert_eq!(apartments.len(), 2);

    let aps: usize = apartments
        .iter()
        .flat_map(|a| a.devices.iter())
        .filter(|d| d.device_type == "ap")
        .count();
    assert_eq!(aps, 2);

    let mut towers = build_towers(apartments, &f.drawing);
    assign_switches(&mut towers, &f.drawing).unwrap();
    let wifi_units = towers[0]
        .switches
        .iter()
        .filter(|u| u.switch_type == "SW-WIFI")
        .count();
    assert_eq!(wifi_units, 1);
}

#[test]
fn identical_input_yields_byte_identical_artifacts() {
    let first = artifacts(&fixture(CENSUS_JSON, DRAWING_JSON));
    let second = artifacts(&fixture(CENSUS_JSON, DRAWING_JSON));
    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
    assert_eq!(first.2, second.2);
}

#[test]
fn unmapped_device_type_fails_before_layout() {
    let drawing_json = DRAWING_JSON.replace(
        r#""switch_mapping": { "ap": "SW-WIFI", "phone": "SW-TEL", "tv": "SW-IPTV" }"#,
        r#""switch_mapping": { "ap": "SW-WIFI", "phone": "SW-TEL" }"#,
    );
    let dir = tempfile::tempdir().unwrap();
    let census_path = dir.path().join("census.json");
    let drawing_path = dir.path().join("drawing.json");
    fs::write(&census_path, CENSUS_JSON).unwrap();
    fs::write(&drawing_path, drawing_json).unwrap();

    let drawing = DrawingConfig::load(&drawing_path).unwrap();
    let census = CensusConfig::load(&census_path).unwrap();
    let err = census.validate_against(&drawing).unwrap_err();
    assert!(matches!(err, ConfigError::UnmappedDeviceType { device } if device == "tv"));
}

#[test]
fn zero_tower_separation_is_rejected_at_load() {
    let drawing_json = DRAWING_JSON.replace(
        r#""tower_separation": 600.0"#,
        r#""tower_separation": 0.0"#,
    );
    let dir = tempfile::tempdir().unwrap();
    let drawing_path = dir.path().join("drawing.json");
    fs::write(&drawing_path, drawing_json).unwrap();

    let err = DrawingConfig::load(&drawing_path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonPositiveDimension {
            key: "tower_separation",
            ..
        }
    ));
}

#[test]
fn script_contains_every_tower_and_floor() {
    let f = fixture(CENSUS_JSON, DRAWING_JSON);
    let (script, _, _) = artifacts(&f);
    // 19 apartments at 8 per tower: MDF, IDF1, IDF2.
    for name in ["MDF", "IDF1", "IDF2"] {
        assert!(script.contains(&format!("\"{name}\"")), "missing {name}");
    }
    assert!(script.contains("LEVEL1"));
    assert!(script.contains("xCAT6A"));
    assert!(script.contains("xFO WIFI"));
    assert!(script.contains("xUPS-PWR"));
}
