//! Errors surfaced when a session is configured.
//!
//! Gameplay itself never fails: missing targets and empty rounds fall back to
//! documented behaviour. Everything that can be wrong is caught here, before
//! the first tick.

use thiserror::Error;

/// Invalid game configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("at least one combatant must be configured")]
    NoCombatants,

    #[error("{count} combatants configured, at most {max} supported")]
    TooManyCombatants { count: usize, max: usize },

    #[error("rounds_to_win must be at least 1")]
    ZeroRoundsToWin,

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("min launch force {min} exceeds max launch force {max}")]
    LaunchForceRange { min: f32, max: f32 },

    #[error("config parse error: {0}")]
    Parse(String),
}
