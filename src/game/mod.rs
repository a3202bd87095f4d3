//! Core game logic module for Snake
//!
//! This module contains the simulation without any I/O or rendering dependencies.
//! A front end drives it by calling [`GameEngine::tick`] once per time step and
//! branching on the returned [`RoundStatus`].

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickResult};
pub use state::{CollisionType, Food, GameState, Position, RoundStatus, Snake};
