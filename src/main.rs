use solar_index::Config;
use solar_index::analysis::IndexComparison;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "./data/config/solar_index.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    info!("Loading configuration from {}", config_path);

    let config = Config::from_file(&config_path).inspect_err(|e| error!("{}", e))?;

    let report = IndexComparison::new(config)
        .run()
        .inspect_err(|e| error!("{}", e))?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
