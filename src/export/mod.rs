pub mod bom;
pub mod csv;

pub use crate::error::ExportError;
pub use bom::write_bom;
pub use csv::write_schedule;
