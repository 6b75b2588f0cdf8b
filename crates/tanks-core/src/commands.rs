//! Player commands sent from a frontend (or bot) to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible inputs to a running session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Tank input ---
    /// Set the drive axes for a player. Values are clamped to `[-1, 1]`.
    Drive { player: u8, throttle: f32, turn: f32 },
    /// Fire button pressed.
    FireDown { player: u8 },
    /// Fire button released.
    FireUp { player: u8 },

    // --- Session control ---
    /// Freeze simulation time.
    Pause,
    /// Resume simulation time.
    Resume,
    /// Discard all state and start a fresh game.
    Restart,
}
