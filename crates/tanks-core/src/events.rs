//! Events emitted by the simulation for audio, effects and UI feedback.
//!
//! The simulation never plays sounds or particles itself; a host turns these
//! cues into presentation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::RoundOutcome;

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A round entered its Starting phase.
    RoundStarted { round: u32 },
    /// Controls were released to the players.
    RoundPlaying { round: u32 },
    /// A round finished.
    RoundEnded { round: u32, outcome: RoundOutcome },
    /// A player reached the rounds-to-win threshold.
    GameWon { player: u8 },
    /// All state was discarded and a new game began.
    SessionRestarted,
    /// Engine loop switched between idle and driving.
    EngineCue { player: u8, driving: bool, pitch: f32 },
    /// Fire button pressed; charging clip should start.
    ChargeStarted { player: u8 },
    /// A shell left the barrel.
    ShellFired { player: u8, launch_force: f32 },
    /// A shell hit something and exploded.
    ShellExploded { position: Vec3, force: f32, radius: f32 },
    /// A tank took blast damage.
    TankDamaged { player: u8, amount: f32, remaining: f32 },
    /// A tank's health ran out; play the tank explosion here.
    TankDestroyed { player: u8, position: Vec3 },
}
