//! Game state snapshot: everything a frontend needs to draw one tick.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Color, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub paused: bool,
    pub phase: RoundPhase,
    pub round: u32,
    /// Text for the central message display. May contain `<color>` markup.
    pub message: String,
    pub tanks: Vec<TankView>,
    pub shells: Vec<ShellView>,
    pub camera: CameraView,
    pub game_winner: Option<u8>,
    pub events: Vec<GameEvent>,
}

/// A tank as a frontend would draw it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub player: u8,
    pub color: Color,
    /// `<color=#RRGGBB>PLAYER n</color>`.
    pub label: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub active: bool,
    pub controls_enabled: bool,
    pub health: f32,
    pub health_fraction: f32,
    pub health_bar_color: Color,
    pub life: LifeState,
    pub aim_slider: f32,
    pub wins: u32,
}

/// A shell in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellView {
    pub owner: u8,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Framing camera rig.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vec3,
    pub rotation: Quat,
    /// Orthographic half-height.
    pub size: f32,
}
