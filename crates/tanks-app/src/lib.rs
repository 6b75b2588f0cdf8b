//! TANKS headless runner.
//!
//! Wires the simulation engine to a game-loop thread and drives every tank
//! with a bot pilot, so whole sessions can be played without a frontend.

pub mod bot;
pub mod game_loop;
pub mod state;

pub use tanks_core as core;
