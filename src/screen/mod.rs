//! Screen flow: menu, play, pause, game over, and the score/info overlays.

pub mod machine;

pub use machine::{Effect, Overlay, Screen, ScreenEvent, ScreenStateMachine, Transition};
