//! Phase, life and cue enums shared by the sim and its frontends.

use serde::{Deserialize, Serialize};

/// Phase of the round lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Tanks reset, controls disabled, "ROUND N" shown for the start delay.
    #[default]
    Starting,
    /// Controls enabled until at most one tank remains active.
    Playing,
    /// Controls disabled, results shown for the end delay.
    Ending,
    /// A game winner exists; the session is about to restart.
    GameOver,
}

/// Health tracker state. One-way within a single activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

/// Which engine loop a tank is playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCue {
    #[default]
    Idle,
    Driving,
}

/// Outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The given player was the last tank standing.
    Winner(u8),
    /// No tank survived.
    Draw,
}
