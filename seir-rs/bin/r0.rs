use std::{env, fs::File, io, process};

use log::{error, info, LevelFilter};
use seir::{
    prelude::*,
    series::read_observations_path,
    sim::{estimate_reproduction, project},
    utils::render_hbars,
};
use simple_logger::SimpleLogger;

/// Estimate R0 from the confirmed (and optionally vaccinated) series of the
/// configuration and project the epidemic until the end date.
fn run(path: &str) -> Result<()> {
    let cfg = Config::load(path)?;
    cfg.validate()?;
    if cfg.verbose {
        println!("{:#?}", cfg);
    }

    let confirmed = match &cfg.run.confirmed {
        Some(path) => read_observations_path(path)?,
        None => {
            return Err(Error::InvalidParameter {
                name: "run.confirmed",
                reason: "path to the confirmed cases CSV is required".into(),
            })
        }
    };
    let vaccinated = match &cfg.run.vaccinated {
        Some(path) => Some(read_observations_path(path)?),
        None => None,
    };
    info!(
        "read {} confirmed observations{}",
        confirmed.len(),
        vaccinated
            .as_ref()
            .map(|v| format!(" and {} vaccinated observations", v.len()))
            .unwrap_or_default()
    );

    let progress = ScaledProgress::new(0, 90, LogProgress::new("estimating R0"));
    let report = estimate_reproduction(&cfg, &confirmed, vaccinated.as_deref(), progress)?;
    let stats = report.stats();
    info!(
        "R0 estimates: mean = {:.2}, std = {:.2}, min = {:.1}, max = {:.1}",
        stats.mean(),
        stats.std(),
        stats.min(),
        stats.max()
    );
    match &cfg.run.estimates_output {
        Some(path) => report.write_csv(File::create(path)?)?,
        None => report.write_csv(io::stdout())?,
    }

    let progress = ScaledProgress::new(90, 10, LogProgress::new("projecting"));
    let curve = project(&cfg, &report, vaccinated.as_deref(), progress)?;
    if let Some(path) = &cfg.run.epicurve_output {
        curve.write_csv(File::create(path)?)?;
        info!("epicurve written to {}", path.display());
    }
    if cfg.verbose {
        let weekly: Vec<Real> = curve.rows().iter().step_by(7).map(|r| r.incidence7).collect();
        println!("{}", render_hbars(&weekly, 60));
    }
    Ok(())
}

pub fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    let path = env::args().nth(1).unwrap_or_else(|| "conf.toml".to_string());
    if let Err(e) = run(&path) {
        error!("{}", e);
        process::exit(1);
    }
}
