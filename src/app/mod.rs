//! The single owner of game state; input and the frame loop talk to it.

pub mod controller;

pub use controller::{GameController, View};
