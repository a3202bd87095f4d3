use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::direction::Direction;
use super::state::Position;

/// Configuration for the game
///
/// Positions are expressed in scaled coordinates: every on-grid position is a
/// multiple of `unit`. The playfield spans `0..=grid_width * unit` horizontally
/// and `0..=grid_height * unit` vertically (both bounds inclusive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playfield in cells
    pub grid_width: u32,
    /// Height of the playfield in cells
    pub grid_height: u32,
    /// Edge length of one cell; the distance the head moves per tick
    pub unit: i32,
    /// Number of segments a fresh snake starts with
    pub initial_length: usize,
    /// Heading of a fresh snake
    pub initial_heading: Direction,
    /// Wall-clock time between two ticks in the terminal front end
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 25,
            grid_height: 20,
            unit: 40,
            initial_length: 3,
            initial_heading: Direction::Down,
            tick_interval_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.unit > 0, "unit must be positive, got {}", self.unit);
        ensure!(
            self.grid_width >= 2 && self.grid_height >= 2,
            "grid must be at least 2x2 cells, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.initial_length >= 1,
            "initial snake length must be at least 1"
        );
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");

        // The inclusive bound must stay representable after one more step.
        let max = i64::from(self.grid_width.max(self.grid_height)) * i64::from(self.unit);
        ensure!(
            max + i64::from(self.unit) <= i64::from(i32::MAX),
            "playfield of {}x{} cells with unit {} overflows coordinates",
            self.grid_width,
            self.grid_height,
            self.unit
        );
        Ok(())
    }

    /// Largest valid x coordinate of the head
    pub fn max_x(&self) -> i32 {
        self.grid_width as i32 * self.unit
    }

    /// Largest valid y coordinate of the head
    pub fn max_y(&self) -> i32 {
        self.grid_height as i32 * self.unit
    }

    /// Where every segment of a fresh snake starts
    pub fn start_position(&self) -> Position {
        Position::new(self.unit, self.unit)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
