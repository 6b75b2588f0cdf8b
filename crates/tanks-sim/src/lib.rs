//! Simulation engine for TANKS.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, drives the
//! round state machine and produces `GameStateSnapshot`s for a frontend.

pub mod arena;
pub mod camera;
pub mod damage;
pub mod engine;
pub mod health;
pub mod profile;
pub mod round;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use tanks_core as core;
