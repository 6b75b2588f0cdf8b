//! Per-tick systems over the tank world.
//!
//! Each is a free function taking the world plus whatever it reports into
//! (event list, launches). Run order lives in the engine.

pub mod movement;
pub mod shells;
pub mod shooting;
pub mod snapshot;
