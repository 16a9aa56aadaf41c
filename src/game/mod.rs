//! Core game logic module for Snake
//!
//! Grid rules, the tick clock and run configuration. Nothing in here touches
//! the terminal, audio or storage; callers react to [`TickOutcome`]s.

pub mod clock;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use clock::GameClock;
pub use config::{Difficulty, GameConfig, ParseNameError};
pub use engine::{GameEngine, TickOutcome};
pub use state::{CollisionType, Direction, GameState, Position, Snake};
