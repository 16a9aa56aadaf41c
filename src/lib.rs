//! Snake Arcade - a terminal Snake game
//!
//! This library provides:
//! - Core grid logic, the fixed-rate clock and difficulty presets (game module)
//! - The screen state machine driving menu, play, pause and game over (screen module)
//! - High scores and preferences over a string key/value store (storage module)
//! - Snake skins and light/dark themes (skin module)
//! - The controller tying it together, and its TUI front end (app, render, modes)

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod screen;
pub mod skin;
pub mod storage;
