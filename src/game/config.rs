use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest grid edge, in cells, regardless of the available viewport
pub const MIN_GRID_SIZE: usize = 10;

/// Terminal columns used to draw one grid cell
pub const CELL_WIDTH: u16 = 2;

/// Rows taken by the HUD, the key hints and the board's top and bottom borders
pub const CHROME_HEIGHT: u16 = 8;

/// Columns taken by the board's left and right borders
pub const CHROME_WIDTH: u16 = 2;

/// Returned when a name does not match any known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}'")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub name: String,
}

/// Difficulty preset; each maps to a fixed tick interval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Milliseconds between simulation ticks
    pub fn tick_interval_ms(&self) -> u64 {
        match self {
            Difficulty::Easy => 150,
            Difficulty::Medium => 100,
            Difficulty::Hard => 70,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError {
                kind: "difficulty",
                name: s.to_string(),
            })
    }
}

/// Configuration for a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 1,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size, clamped to the minimum
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width.max(MIN_GRID_SIZE),
            grid_height: height.max(MIN_GRID_SIZE),
            ..Default::default()
        }
    }

    /// Create a small grid, handy for tests
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Derive the grid from the terminal area available to the game.
    ///
    /// Each cell is `CELL_WIDTH` columns wide and one row tall; borders and
    /// HUD lines are subtracted first.
    pub fn from_viewport(area_width: u16, area_height: u16) -> Self {
        let inner_width = area_width.saturating_sub(CHROME_WIDTH) / CELL_WIDTH;
        let inner_height = area_height.saturating_sub(CHROME_HEIGHT);
        Self::new(inner_width as usize, inner_height as usize)
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 1);
    }

    #[test]
    fn test_custom_config_clamps_to_minimum() {
        let config = GameConfig::new(4, 15);
        assert_eq!(config.grid_width, MIN_GRID_SIZE);
        assert_eq!(config.grid_height, 15);
    }

    #[test]
    fn test_from_viewport() {
        // 82 columns: 80 inner / 2 per cell
        let config = GameConfig::from_viewport(82, 30);
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 22);

        let tiny = GameConfig::from_viewport(5, 5);
        assert_eq!(tiny.grid_width, MIN_GRID_SIZE);
        assert_eq!(tiny.grid_height, MIN_GRID_SIZE);
    }

    #[test]
    fn test_difficulty_intervals() {
        assert_eq!(Difficulty::Easy.tick_interval_ms(), 150);
        assert_eq!(Difficulty::Medium.tick_interval_ms(), 100);
        assert_eq!(Difficulty::Hard.tick_interval_ms(), 70);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        let err = "nightmare".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.to_string(), "unknown difficulty 'nightmare'");
    }

    #[test]
    fn test_difficulty_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
