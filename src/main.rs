use std::env;
use std::process::ExitCode;

use forecast_fixtures::{Driver, FixtureConfig};
use tracing::{error, info};

const USAGE: &str = "Usage:\n  forecast-fixtures [CONFIG.toml]\n\nWithout a config file the built-in jobs are written to ./fixtures/.\nThe output directories must already exist.";

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if matches!(args.get(1).map(String::as_str), Some("-h" | "--help")) {
        eprintln!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    if args.len() > 2 {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    }

    let cfg = match args.get(1) {
        Some(path) => match FixtureConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("cannot load config: {e}");
                return ExitCode::from(2);
            }
        },
        None => FixtureConfig::default(),
    };

    let driver = match Driver::from_config(&cfg) {
        Ok(driver) => driver,
        Err(e) => {
            error!("cannot start: {e}");
            return ExitCode::from(2);
        }
    };

    info!(jobs = cfg.jobs.len(), timezone = %cfg.timezone, "generating forecast fixtures");
    let report = driver.run(&cfg.jobs);

    if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        for (job, e) in report.failures() {
            error!(path = %job.output.display(), "not written: {e}");
        }
        ExitCode::FAILURE
    }
}
