//! Device schedule export: one CSV row per apartment/device pair.
//!
//! Fed solely by the census expander's output; tower and floor
//! assignment never reaches the schedule.

use std::fs::File;
use std::path::Path;

use crate::config::DrawingConfig;
use crate::error::ExportError;
use crate::model::ApartmentInstance;

pub fn write_schedule<P: AsRef<Path>>(
    apartments: &[ApartmentInstance],
    config: &DrawingConfig,
    path: P,
) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
        "Device ID",
        "Device Type",
        "Label",
        "Apartment",
        "Apartment Type",
        "Rooms",
    ])?;

    for apartment in apartments {
        for device in &apartment.devices {
            let label = config
                .devices
                .get(&device.device_type)
                .map_or(device.device_type.as_str(), |style| style.label.as_str());
            writer.write_record([
                &format!("{}-{}-{}", label, apartment.id, device.seq),
                &device.device_type,
                &label.to_string(),
                &apartment.id,
                &apartment.type_name,
                &apartment.rooms.to_string(),
            ])?;
        }
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::drawing::sample_config;
    use crate::config::CensusConfig;
    use crate::plan::expand_census;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_row_per_device_plus_header() {
        let config = sample_config();
        let census: CensusConfig = serde_json::from_str(
            r#"{ "1B": { "count": 2, "rooms": 1, "devices": { "ap": 1, "phone": 1, "tv": 1 } } }"#,
        )
        .unwrap();
        let apartments = expand_census(&census, &config).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        write_schedule(&apartments, &config, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            "Device ID,Device Type,Label,Apartment,Apartment Type,Rooms"
        );
        assert_eq!(lines[1], "AP-1B-1-1,ap,AP,1B-1,1B,1");
    }
}
