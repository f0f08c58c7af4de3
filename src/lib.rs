//! # riser-gen
//!
//! Turns a declarative apartment census into a building network riser
//! diagram and a flat device schedule.
//!
//! ## Pipeline
//!
//! - Expand the census into concrete apartment and device instances
//! - Deal apartments into towers and floors under an explicit policy
//! - Resolve switch units per tower from device demand and capacity
//! - Place every entity at a deterministic 2D coordinate
//! - Emit layer-tagged drawing commands and serialize them to AutoLISP
//!
//! ## Example
//!
//! ```no_run
//! use riser_gen::config::{CensusConfig, DrawingConfig};
//! use riser_gen::draw::{emit, render_script};
//! use riser_gen::plan::{assign_switches, build_towers, expand_census, layout};
//!
//! # fn run() -> Result<(), riser_gen::error::ConfigError> {
//! let drawing = DrawingConfig::load("drawing.json")?;
//! let census = CensusConfig::load("census.json")?;
//! census.validate_against(&drawing)?;
//!
//! let apartments = expand_census(&census, &drawing)?;
//! let mut towers = build_towers(apartments, &drawing);
//! assign_switches(&mut towers, &drawing)?;
//! let plan = layout(&towers, &drawing);
//! let script = render_script(&emit(&plan, &drawing)?, &drawing);
//! println!("{script}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod model;
pub mod plan;
