//! Charge-to-fire system.
//!
//! Holding fire builds launch force from min to max over the charge time.
//! Releasing fires at the current force; reaching max force fires
//! immediately, even with the button still held.

use glam::{Quat, Vec3};
use hecs::World;
use tracing::debug;

use tanks_core::components::{Activation, ControlInput, Controls, Shooting, Tank};
use tanks_core::constants::{FIRE_ELEVATION_DEGREES, FIRE_POINT_OFFSET};
use tanks_core::events::GameEvent;
use tanks_core::types::Pose;

use super::shells::ShellLaunch;

/// Fire button state for one update.
#[derive(Debug, Clone, Copy, Default)]
pub struct FireButton {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
}

/// What a charge update decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeAction {
    None,
    /// Button went down; charge restarted from min.
    Started,
    /// Button held; force grew.
    Charging,
    /// A shell leaves at this launch force.
    Fire(f32),
}

/// Run one charge update for every active tank with controls enabled.
/// Returns the shells to spawn.
pub fn run(world: &mut World, events: &mut Vec<GameEvent>, dt: f32) -> Vec<ShellLaunch> {
    let mut launches = Vec::new();

    for (_entity, (tank, activation, controls, pose, input, shooting)) in world.query_mut::<(
        &Tank,
        &Activation,
        &Controls,
        &Pose,
        &mut ControlInput,
        &mut Shooting,
    )>() {
        // Edges only count for the update they arrive in.
        let button = FireButton {
            pressed: std::mem::take(&mut input.fire_pressed),
            held: input.fire_held,
            released: std::mem::take(&mut input.fire_released),
        };

        if !activation.active || !controls.enabled {
            continue;
        }

        match update_charge(shooting, button, dt) {
            ChargeAction::Fire(launch_force) => {
                let (position, direction) = muzzle(pose);
                launches.push(ShellLaunch {
                    owner: tank.player,
                    position,
                    velocity: direction * launch_force,
                });
                events.push(GameEvent::ShellFired {
                    player: tank.player,
                    launch_force,
                });
                debug!(player = tank.player, launch_force, "shell fired");
            }
            ChargeAction::Started => {
                events.push(GameEvent::ChargeStarted {
                    player: tank.player,
                });
            }
            ChargeAction::Charging | ChargeAction::None => {}
        }
    }

    launches
}

/// Advance the charge state machine by one update.
pub fn update_charge(shooting: &mut Shooting, button: FireButton, dt: f32) -> ChargeAction {
    shooting.aim_slider = shooting.min_launch_force;

    if shooting.current_launch_force >= shooting.max_launch_force && !shooting.fired {
        shooting.current_launch_force = shooting.max_launch_force;
        ChargeAction::Fire(fire(shooting))
    } else if button.pressed {
        shooting.fired = false;
        shooting.current_launch_force = shooting.min_launch_force;
        ChargeAction::Started
    } else if button.held && !shooting.fired {
        shooting.current_launch_force += shooting.charge_speed * dt;
        shooting.aim_slider = shooting.current_launch_force;
        ChargeAction::Charging
    } else if button.released && !shooting.fired {
        ChargeAction::Fire(fire(shooting))
    } else {
        ChargeAction::None
    }
}

/// Latch `fired`, reset the charge, and return the force the shell leaves with.
fn fire(shooting: &mut Shooting) -> f32 {
    shooting.fired = true;
    let launch_force = shooting.current_launch_force;
    shooting.current_launch_force = shooting.min_launch_force;
    launch_force
}

/// World-space muzzle position and unit firing direction for a tank pose.
pub fn muzzle(pose: &Pose) -> (Vec3, Vec3) {
    let position = pose.transform_point(Vec3::from_array(FIRE_POINT_OFFSET));
    let elevation = Quat::from_rotation_x(-FIRE_ELEVATION_DEGREES.to_radians());
    let direction = (pose.rotation * elevation * Vec3::Z).normalize();
    (position, direction)
}
