//! Platform layer
//!
//! Handles the parts that touch the OS event loop:
//! - Frame pacing and timestamps
//! - Keyboard input

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{InputState, KeyAction, map_key};
