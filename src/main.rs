use anyhow::Result;
use clap::Parser;
use snakecharm::game::{GameConfig, GameEngine};
use snakecharm::logging::init_file_logging;
use snakecharm::modes::HumanMode;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "snakecharm")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// TOML file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playfield width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Playfield height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Cell edge length in coordinate units
    #[arg(long)]
    unit: Option<i32>,

    /// Number of segments the snake starts with
    #[arg(long)]
    initial_length: Option<usize>,

    /// Milliseconds between two ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
        if let Some(length) = self.initial_length {
            config.initial_length = length;
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

    if let Some(path) = &cli.log_file {
        init_file_logging(path, &cli.log_level)?;
    }

    let config = cli.game_config()?;
    info!(?config, seed = ?cli.seed, "configuration loaded");

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed)?,
        None => GameEngine::new(config)?,
    };

    let mut human_mode = HumanMode::with_engine(engine);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["snakecharm", "--width", "12", "--tick-ms", "250"]);
        let config = cli.game_config().unwrap();

        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.tick_interval_ms, 250);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let cli = Cli::parse_from(["snakecharm", "--unit", "0"]);
        assert!(cli.game_config().is_err());
    }
}
