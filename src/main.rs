use anyhow::Result;

use botsweep::app::SweepApp;
use botsweep::config;
use botsweep::infrastructure::{directories, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories, &config.sink)?;
    logging::init_tracing(&config.logging.level, &paths.logs_dir)?;

    let app = SweepApp::initialize(config, paths)?;
    app.run().await
}
