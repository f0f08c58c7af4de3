//! Error types for riser-gen.

use std::path::PathBuf;
use thiserror::Error;

/// Errors caused by malformed or inconsistent configuration.
///
/// Every variant is fatal and deterministic: the run aborts before any
/// output artifact is written.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file from disk.
    #[error("failed to read config file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or does not match the schema.
    #[error("invalid config file '{path}': {source}")]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A census entry counts devices of a type with no style entry.
    #[error("apartment type '{apartment_type}' references unknown device type '{device}'")]
    UnknownDeviceType {
        apartment_type: String,
        device: String,
    },

    /// A device type has no entry in the device → switch mapping.
    #[error("device type '{device}' has no switch mapping")]
    UnmappedDeviceType { device: String },

    /// A mapped switch type has no draw-order entry in the switch table.
    #[error("switch type '{switch}' has no draw-order entry")]
    UnorderedSwitchType { switch: String },

    /// A layer name is absent from the layer → color table.
    #[error("unrecognized layer '{layer}'")]
    UnknownLayer { layer: String },

    /// A device style names an icon with no glyph in the script dialect.
    #[error("device type '{device}' uses unrecognized icon '{icon}'")]
    UnknownIcon { device: String, icon: String },

    /// A spacing or dimension constant that must be strictly positive is not.
    #[error("'{key}' must be positive (got {value})")]
    NonPositiveDimension { key: &'static str, value: f64 },
}

/// Errors that can occur when writing output artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
