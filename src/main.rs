use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

use riser_gen::config::{CensusConfig, DrawingConfig};
use riser_gen::draw::{emit, render_script};
use riser_gen::export::{write_bom, write_schedule};
use riser_gen::plan::{assign_switches, build_towers, expand_census, layout};

#[derive(Parser, Debug)]
#[command(name = "riser-gen")]
#[command(about = "Generate network riser diagrams and device schedules from an apartment census")]
#[command(version)]
struct Args {
    /// Path to the census JSON file
    census: PathBuf,

    /// Path to the drawing config JSON file
    drawing: PathBuf,

    /// Write the device schedule CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Write the AutoLISP drawing script
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Write the bill of materials
    #[arg(long, value_name = "FILE")]
    bom: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();
    let args = Args::parse();

    let drawing = DrawingConfig::load(&args.drawing)?;
    let census = CensusConfig::load(&args.census)?;
    census.validate_against(&drawing)?;

    let apartments = expand_census(&census, &drawing)?;
    let mut towers = build_towers(apartments.clone(), &drawing);
    assign_switches(&mut towers, &drawing)?;
    let plan = layout(&towers, &drawing);
    let commands = emit(&plan, &drawing)?;

    // The pipeline has fully succeeded; only now touch the filesystem.
    if let Some(path) = &args.csv {
        write_schedule(&apartments, &drawing, path)?;
        println!("Wrote device schedule: {}", path.display());
    }
    if let Some(path) = &args.script {
        std::fs::write(path, render_script(&commands, &drawing))?;
        println!("Wrote drawing script: {}", path.display());
    }
    if let Some(path) = &args.bom {
        write_bom(&towers, &drawing, path)?;
        println!("Wrote bill of materials: {}", path.display());
    }

    if args.csv.is_none() && args.script.is_none() && args.bom.is_none() {
        let devices: usize = apartments.iter().map(|a| a.devices.len()).sum();
        let switches: usize = towers.iter().map(|t| t.switches.len()).sum();
        println!(
            "{} apartments, {} devices, {} towers, {} switch units, {} drawing commands",
            apartments.len(),
            devices,
            towers.len(),
            switches,
            commands.len()
        );
        println!("Pass --csv, --script, or --bom to write artifacts.");
    }

    Ok(())
}
