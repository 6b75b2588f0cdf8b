//! Session configuration.
//!
//! Every field has a default matching the constants in [`crate::constants`],
//! so a config file only needs to name what it changes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::{Color, Pose};

/// Largest number of player slots (player numbers are `u8`, 1-based).
pub const MAX_COMBATANTS: usize = u8::MAX as usize;

/// Complete configuration for one game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed. Same seed and inputs = same session.
    pub seed: u64,
    /// Fixed ticks per second.
    pub tick_rate: u32,
    pub rounds: RoundConfig,
    pub camera: CameraConfig,
    pub tank: TankConfig,
    pub weapon: WeaponConfig,
    pub shell: ShellConfig,
    /// One entry per player, in player-number order.
    pub players: Vec<PlayerSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub rounds_to_win: u32,
    pub start_delay_secs: f32,
    pub end_delay_secs: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub damp_time: f32,
    pub edge_buffer: f32,
    pub min_size: f32,
    pub aspect: f32,
    pub pitch_degrees: f32,
    pub yaw_degrees: f32,
    /// Height the rig is held at.
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TankConfig {
    pub speed: f32,
    pub turn_speed: f32,
    pub starting_health: f32,
    pub pitch_range: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub min_launch_force: f32,
    pub max_launch_force: f32,
    pub max_charge_time: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub max_damage: f32,
    pub explosion_radius: f32,
    pub explosion_force: f32,
    pub max_lifetime_secs: f32,
}

/// A player slot: colour and where the tank spawns each round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub color: Color,
    pub spawn: Pose,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate: TICK_RATE,
            rounds: RoundConfig::default(),
            camera: CameraConfig::default(),
            tank: TankConfig::default(),
            weapon: WeaponConfig::default(),
            shell: ShellConfig::default(),
            players: vec![
                PlayerSlot {
                    color: Color::from_rgb8(42, 100, 178),
                    spawn: Pose::from_yaw(Vec3::new(-3.0, 0.0, 30.0), 180.0),
                },
                PlayerSlot {
                    color: Color::from_rgb8(229, 46, 40),
                    spawn: Pose::from_yaw(Vec3::new(13.0, 0.0, -5.0), 0.0),
                },
            ],
        }
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            rounds_to_win: ROUNDS_TO_WIN,
            start_delay_secs: START_DELAY_SECS,
            end_delay_secs: END_DELAY_SECS,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            damp_time: CAMERA_DAMP_TIME,
            edge_buffer: CAMERA_EDGE_BUFFER,
            min_size: CAMERA_MIN_SIZE,
            aspect: CAMERA_ASPECT,
            pitch_degrees: CAMERA_PITCH_DEGREES,
            yaw_degrees: CAMERA_YAW_DEGREES,
            height: 0.0,
        }
    }
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            speed: TANK_SPEED,
            turn_speed: TANK_TURN_SPEED,
            starting_health: TANK_STARTING_HEALTH,
            pitch_range: ENGINE_PITCH_RANGE,
        }
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            min_launch_force: MIN_LAUNCH_FORCE,
            max_launch_force: MAX_LAUNCH_FORCE,
            max_charge_time: MAX_CHARGE_TIME,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            max_damage: SHELL_MAX_DAMAGE,
            explosion_radius: SHELL_EXPLOSION_RADIUS,
            explosion_force: SHELL_EXPLOSION_FORCE,
            max_lifetime_secs: SHELL_MAX_LIFETIME,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Check everything the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() {
            return Err(ConfigError::NoCombatants);
        }
        if self.players.len() > MAX_COMBATANTS {
            return Err(ConfigError::TooManyCombatants {
                count: self.players.len(),
                max: MAX_COMBATANTS,
            });
        }
        if self.rounds.rounds_to_win == 0 {
            return Err(ConfigError::ZeroRoundsToWin);
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::NonPositive {
                field: "tick_rate",
                value: 0.0,
            });
        }

        non_negative("rounds.start_delay_secs", self.rounds.start_delay_secs)?;
        non_negative("rounds.end_delay_secs", self.rounds.end_delay_secs)?;
        non_negative("camera.damp_time", self.camera.damp_time)?;
        non_negative("camera.edge_buffer", self.camera.edge_buffer)?;
        non_negative("camera.min_size", self.camera.min_size)?;
        positive("camera.aspect", self.camera.aspect)?;
        positive("tank.starting_health", self.tank.starting_health)?;
        non_negative("tank.speed", self.tank.speed)?;
        non_negative("tank.turn_speed", self.tank.turn_speed)?;
        non_negative("tank.pitch_range", self.tank.pitch_range)?;
        positive("weapon.max_charge_time", self.weapon.max_charge_time)?;
        non_negative("weapon.min_launch_force", self.weapon.min_launch_force)?;
        positive("weapon.max_launch_force", self.weapon.max_launch_force)?;
        if self.weapon.min_launch_force > self.weapon.max_launch_force {
            return Err(ConfigError::LaunchForceRange {
                min: self.weapon.min_launch_force,
                max: self.weapon.max_launch_force,
            });
        }
        non_negative("shell.max_damage", self.shell.max_damage)?;
        positive("shell.explosion_radius", self.shell.explosion_radius)?;
        non_negative("shell.explosion_force", self.shell.explosion_force)?;
        positive("shell.max_lifetime_secs", self.shell.max_lifetime_secs)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this check too.
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
