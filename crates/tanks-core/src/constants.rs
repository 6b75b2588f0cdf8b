//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind [`crate::config::GameConfig`]; the engine
//! reads the config, never these directly, except for fixed geometry.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Gravity along -y (m/s²).
pub const GRAVITY: f32 = 9.81;

// --- Rounds ---

/// Round wins needed to win the game.
pub const ROUNDS_TO_WIN: u32 = 5;

/// Pause between Starting and Playing (seconds).
pub const START_DELAY_SECS: f32 = 3.0;

/// Pause between Ending and the next round (seconds).
pub const END_DELAY_SECS: f32 = 3.0;

// --- Camera ---

/// Smoothing time for camera move and zoom (seconds).
pub const CAMERA_DAMP_TIME: f32 = 0.2;

/// Space kept between the outermost tank and the screen edge.
pub const CAMERA_EDGE_BUFFER: f32 = 4.0;

/// Smallest orthographic half-height the camera zooms to.
pub const CAMERA_MIN_SIZE: f32 = 6.5;

/// Viewport width / height.
pub const CAMERA_ASPECT: f32 = 16.0 / 9.0;

/// Camera rig pitch (degrees, looking down).
pub const CAMERA_PITCH_DEGREES: f32 = 40.0;

/// Camera rig yaw (degrees).
pub const CAMERA_YAW_DEGREES: f32 = 60.0;

// --- Tanks ---

/// Forward/backward speed (units/s).
pub const TANK_SPEED: f32 = 12.0;

/// Turn rate (degrees/s).
pub const TANK_TURN_SPEED: f32 = 180.0;

/// Health on (re)activation.
pub const TANK_STARTING_HEALTH: f32 = 100.0;

/// Horizontal contact radius of a tank hull.
pub const TANK_HIT_RADIUS: f32 = 1.0;

/// Height of a tank hull above the ground.
pub const TANK_HEIGHT: f32 = 1.2;

/// Axis magnitude below which the engine counts as idle.
pub const ENGINE_IDLE_THRESHOLD: f32 = 0.1;

/// Base engine pitch.
pub const ENGINE_BASE_PITCH: f32 = 1.0;

/// Random pitch variation either side of the base pitch.
pub const ENGINE_PITCH_RANGE: f32 = 0.2;

// --- Shooting ---

/// Launch force with no charge.
pub const MIN_LAUNCH_FORCE: f32 = 15.0;

/// Launch force at full charge.
pub const MAX_LAUNCH_FORCE: f32 = 30.0;

/// Hold time to reach full charge (seconds).
pub const MAX_CHARGE_TIME: f32 = 0.75;

/// Muzzle position in tank-local space.
pub const FIRE_POINT_OFFSET: [f32; 3] = [0.0, 1.7, 1.35];

/// Muzzle elevation (degrees above horizontal).
pub const FIRE_ELEVATION_DEGREES: f32 = 10.0;

// --- Shells ---

/// Damage for a direct hit.
pub const SHELL_MAX_DAMAGE: f32 = 100.0;

/// Blast radius.
pub const SHELL_EXPLOSION_RADIUS: f32 = 5.0;

/// Blast force at the centre of the explosion.
pub const SHELL_EXPLOSION_FORCE: f32 = 1000.0;

/// Shells still flying after this long are removed (seconds).
pub const SHELL_MAX_LIFETIME: f32 = 2.0;
