//! Drive system: samples input, switches engine cues, integrates pose.

use glam::Quat;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tanks_core::components::{Activation, ControlInput, Controls, Movement, Tank};
use tanks_core::constants::ENGINE_IDLE_THRESHOLD;
use tanks_core::enums::EngineCue;
use tanks_core::events::GameEvent;
use tanks_core::types::Pose;

/// Move and turn every active tank whose controls are enabled.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, events: &mut Vec<GameEvent>, dt: f32) {
    for (_entity, (tank, activation, controls, input, movement, pose)) in world.query_mut::<(
        &Tank,
        &Activation,
        &Controls,
        &ControlInput,
        &mut Movement,
        &mut Pose,
    )>() {
        if !activation.active || !controls.enabled {
            continue;
        }

        movement.throttle_input = input.throttle;
        movement.turn_input = input.turn;

        if let Some(driving) = update_engine_cue(movement, rng) {
            events.push(GameEvent::EngineCue {
                player: tank.player,
                driving,
                pitch: movement.pitch,
            });
        }

        integrate(pose, movement, dt);
    }
}

/// Advance `pose` by one step of the sampled inputs.
pub fn integrate(pose: &mut Pose, movement: &Movement, dt: f32) {
    let distance = movement.throttle_input * movement.speed * dt;
    pose.position += pose.forward() * distance;

    let turn_degrees = movement.turn_input * movement.turn_speed * dt;
    pose.rotation = (pose.rotation * Quat::from_rotation_y(turn_degrees.to_radians())).normalize();
}

/// Switch between idle and driving loops. Returns the new state on a switch.
pub fn update_engine_cue(movement: &mut Movement, rng: &mut ChaCha8Rng) -> Option<bool> {
    let idle = movement.throttle_input.abs() < ENGINE_IDLE_THRESHOLD
        && movement.turn_input.abs() < ENGINE_IDLE_THRESHOLD;

    let next = match (idle, movement.engine_cue) {
        (true, EngineCue::Driving) => EngineCue::Idle,
        (false, EngineCue::Idle) => EngineCue::Driving,
        _ => return None,
    };

    movement.engine_cue = next;
    let low = movement.base_pitch - movement.pitch_range;
    let high = movement.base_pitch + movement.pitch_range;
    movement.pitch = rng.gen_range(low..=high);

    Some(next == EngineCue::Driving)
}
