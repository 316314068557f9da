use std::{env, path::PathBuf};

use anyhow::Result;

use reviewlens::settings::ReportSettings;

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("reviewlens starting up...");

    let settings_path = env::args().nth(1).map(PathBuf::from);
    let settings = ReportSettings::load(settings_path)?;

    let output = reviewlens::run(&settings)?;
    log::info!("Done: {}", output.display());
    Ok(())
}
