use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};
use snake_tui::game::GameConfig;
use snake_tui::logging::init_file_logger;
use snake_tui::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_tui")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between game ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// JSON file with game settings; flags above take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a log to this file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Log every tick decision, not just round events
    #[arg(long, requires = "log")]
    debug: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        let level = if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        init_file_logger(path, level)?;
    }

    let config = cli.game_config()?;
    info!("starting with {config:?}");

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
