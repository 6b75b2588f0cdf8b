//! Camera framing: keeps every active tank on screen.
//!
//! The rig sits at a fixed orientation and moves in the horizontal plane.
//! Each tick it eases toward the average tank position and zooms so the
//! furthest tank stays inside the edge buffer.

use glam::{Quat, Vec3};

use tanks_core::config::CameraConfig;
use tanks_core::state::CameraView;

/// Floor for the smoothing time to keep the spring finite.
const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Framing camera rig state.
#[derive(Debug, Clone)]
pub struct CameraRig {
    position: Vec3,
    rotation: Quat,
    size: f32,
    desired_position: Vec3,
    move_velocity: Vec3,
    zoom_speed: f32,
    damp_time: f32,
    edge_buffer: f32,
    min_size: f32,
    aspect: f32,
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        let rotation = Quat::from_rotation_y(config.yaw_degrees.to_radians())
            * Quat::from_rotation_x(config.pitch_degrees.to_radians());
        let position = Vec3::new(0.0, config.height, 0.0);
        Self {
            position,
            rotation,
            size: config.min_size,
            desired_position: position,
            move_velocity: Vec3::ZERO,
            zoom_speed: 0.0,
            damp_time: config.damp_time,
            edge_buffer: config.edge_buffer,
            min_size: config.min_size,
            aspect: config.aspect,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Ease position and size toward the framing of `targets`. Once per tick.
    pub fn fixed_update(&mut self, targets: &[Vec3], dt: f32) {
        self.desired_position = desired_position(targets, self.position.y, self.desired_position);
        self.position = smooth_damp_vec3(
            self.position,
            self.desired_position,
            &mut self.move_velocity,
            self.damp_time,
            dt,
        );

        let required = self.required_size(targets);
        self.size = smooth_damp(self.size, required, &mut self.zoom_speed, self.damp_time, dt);
    }

    /// Jump straight to the framing of `targets`. Used at round start.
    pub fn snap(&mut self, targets: &[Vec3]) {
        self.desired_position = desired_position(targets, self.position.y, self.desired_position);
        self.position = self.desired_position;
        self.size = self.required_size(targets);
        self.move_velocity = Vec3::ZERO;
        self.zoom_speed = 0.0;
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position,
            rotation: self.rotation,
            size: self.size,
        }
    }

    fn required_size(&self, targets: &[Vec3]) -> f32 {
        required_size(
            targets,
            self.desired_position,
            self.rotation,
            self.min_size,
            self.edge_buffer,
            self.aspect,
        )
    }
}

/// Average of `targets` with the vertical axis held at `height`.
///
/// With no targets the previous desired position is kept.
pub fn desired_position(targets: &[Vec3], height: f32, previous: Vec3) -> Vec3 {
    if targets.is_empty() {
        return previous;
    }

    let sum: Vec3 = targets.iter().copied().sum();
    let mut average = sum / targets.len() as f32;
    average.y = height;
    average
}

/// Orthographic half-height needed to show every target around `desired`.
///
/// Offsets are measured in rig-local space; horizontal offsets are scaled by
/// the aspect ratio. The result includes the edge buffer and never drops
/// below `min_size`.
pub fn required_size(
    targets: &[Vec3],
    desired: Vec3,
    rotation: Quat,
    min_size: f32,
    edge_buffer: f32,
    aspect: f32,
) -> f32 {
    let to_local = rotation.inverse();

    let size = targets.iter().fold(0.0_f32, |size, target| {
        let offset = to_local * (*target - desired);
        size.max(offset.y.abs()).max(offset.x.abs() / aspect)
    });

    (size + edge_buffer).max(min_size)
}

/// Critically damped spring toward `target`.
///
/// `velocity` carries state between calls. Never overshoots the target.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let decay = decay_factor(omega * dt);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// Vector form of [`smooth_damp`].
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let decay = decay_factor(omega * dt);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }
    output
}

/// Polynomial approximation of `exp(-x)`.
fn decay_factor(x: f32) -> f32 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}
