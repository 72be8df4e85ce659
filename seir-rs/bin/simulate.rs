use std::{env, process};

use log::{error, LevelFilter};
use seir::{prelude::*, utils::render_vbars};
use simple_logger::SimpleLogger;

/// Simulate the configured model with a constant R0 and print its epicurve.
fn run(path: Option<String>) -> Result<()> {
    let cfg = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cfg.validate()?;

    let mut sim = Simulation::new(cfg.seir(), cfg.run.start)
        .with_progress(LogProgress::new("simulating"));
    let curve = sim.run(cfg.run.end)?;

    let daily: Vec<Real> = curve.rows().iter().map(|r| r.daily as Real).collect();
    println!("{}", render_vbars(&daily, 20));
    println!("{}", sim.model());
    if cfg.verbose {
        println!("{}", curve.to_csv_string()?);
    }
    Ok(())
}

pub fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    if let Err(e) = run(env::args().nth(1)) {
        error!("{}", e);
        process::exit(1);
    }
}
