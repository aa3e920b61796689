use std::{error::Error, path::Path};

use clap::Parser;
use log::{error, info, warn};
use taxi_loader::{
    config::{WarehouseConfig, MONTHS},
    driver,
    fetch::Fetcher,
    load::Loader,
    warehouse::snowsql::SnowSql,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Environment name, e.g., test, prod
    #[arg(short, long, default_value = "prod")]
    env: String,
}

/// Download the NYC yellow taxi trip files for the configured months and
/// load them into RAW.YELLOW_TAXI_TRIPS.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let env_file = format!(".env/{}.env", args.env);
    if let Err(e) = dotenvy::from_path(Path::new(&env_file)) {
        warn!("Could not read {}: {}.  Using the process environment.", env_file, e);
    }

    let config = WarehouseConfig::from_env();
    info!("Using {:?}", config);

    let fetcher = Fetcher::with_defaults()?;
    let loader = Loader::new(SnowSql::from_env(), &config);

    if let Err(e) = driver::run(MONTHS, &fetcher, &loader) {
        error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}
