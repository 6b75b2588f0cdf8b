//! Fundamental geometric and simulation types.
//!
//! Coordinates are y-up: x = right, y = up, z = forward. Rotations about the
//! y axis are yaw.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of an object in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` facing `yaw_degrees` about the up axis.
    pub fn from_yaw(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw_degrees.to_radians()),
        }
    }

    /// Unit vector along the local +Z axis.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Map a point from local space into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}

/// RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Upper-case `RRGGBB` hex string (no leading `#`).
    pub fn to_html_rgb(&self) -> String {
        format!(
            "{:02X}{:02X}{:02X}",
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b)
        )
    }
}

fn channel_to_u8(c: f32) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}
