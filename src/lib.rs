//! snakecharm - terminal Snake
//!
//! This library provides:
//! - Core simulation: grid movement, growth, collisions, round lifecycle (game module)
//! - Key mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive front end that ties them together (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
