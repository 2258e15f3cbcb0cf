use anyhow::{anyhow, Result};
use log::info;
use marble_maze::config::MazeConfig;
use marble_maze::gui;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = MazeConfig::default();
    config.validate()?;
    info!("starting a {}x{} maze", config.rows, config.cols);

    gui::run_gui(config).map_err(|e| anyhow!("{e}"))?;
    Ok(())
}
