//! Tank and shell components.
//!
//! Plain data only. Behaviour lives in the sim crate's systems.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Marks an entity as a player tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tank {
    /// 1-based player number.
    pub player: u8,
}

/// Whether the tank takes part in the round (alive and on the field).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Activation {
    pub active: bool,
}

/// Whether player input currently drives the tank.
/// Disabled controls also hide the tank's world-space HUD.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Controls {
    pub enabled: bool,
}

/// Latest input received for a tank, written by commands and read by systems.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ControlInput {
    /// Forward/backward axis in `[-1, 1]`.
    pub throttle: f32,
    /// Turn axis in `[-1, 1]`, positive turns right.
    pub turn: f32,
    /// Fire button currently down.
    pub fire_held: bool,
    /// Fire button went down since the last shooting update.
    pub fire_pressed: bool,
    /// Fire button went up since the last shooting update.
    pub fire_released: bool,
}

/// Drive parameters and the inputs sampled for this tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub speed: f32,
    /// Degrees per second.
    pub turn_speed: f32,
    pub throttle_input: f32,
    pub turn_input: f32,
    pub engine_cue: EngineCue,
    pub base_pitch: f32,
    pub pitch_range: f32,
    /// Pitch chosen at the last cue switch.
    pub pitch: f32,
}

/// Charge-to-fire launcher state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shooting {
    pub min_launch_force: f32,
    pub max_launch_force: f32,
    pub max_charge_time: f32,
    /// Launch force gained per second of holding.
    pub charge_speed: f32,
    pub current_launch_force: f32,
    /// A shell has already left for the current button press.
    pub fired: bool,
    /// Value shown on the aim slider.
    pub aim_slider: f32,
}

/// Per-tank health tracker state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub starting: f32,
    /// No floor: may go negative before death is detected.
    pub current: f32,
    pub life: LifeState,
}

/// A shell in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shell {
    /// Player number of the tank that fired it.
    pub owner: u8,
    /// Seconds since launch.
    pub age_secs: f32,
}

/// Kinematic state of a shell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShellMotion {
    pub position: Vec3,
    pub velocity: Vec3,
}
