//! Tank spawn factory and activation hooks.
//!
//! A tank is one entity carrying Movement, Shooting and Health alongside its
//! pose. Activation and control changes run the same resets the components
//! would perform when switched on.

use hecs::{Entity, World};

use tanks_core::components::*;
use tanks_core::config::GameConfig;
use tanks_core::constants::ENGINE_BASE_PITCH;
use tanks_core::enums::EngineCue;
use tanks_core::types::Pose;

use crate::health;
use crate::profile::CombatantProfile;

/// Spawn a tank for `profile` at its spawn pose and record the instance.
pub fn spawn_tank(world: &mut World, profile: &mut CombatantProfile, config: &GameConfig) -> Entity {
    let movement = Movement {
        speed: config.tank.speed,
        turn_speed: config.tank.turn_speed,
        throttle_input: 0.0,
        turn_input: 0.0,
        engine_cue: EngineCue::Idle,
        base_pitch: ENGINE_BASE_PITCH,
        pitch_range: config.tank.pitch_range,
        pitch: ENGINE_BASE_PITCH,
    };

    let weapon = &config.weapon;
    let shooting = Shooting {
        min_launch_force: weapon.min_launch_force,
        max_launch_force: weapon.max_launch_force,
        max_charge_time: weapon.max_charge_time,
        charge_speed: (weapon.max_launch_force - weapon.min_launch_force) / weapon.max_charge_time,
        current_launch_force: weapon.min_launch_force,
        fired: false,
        aim_slider: weapon.min_launch_force,
    };

    let entity = world.spawn((
        Tank {
            player: profile.player,
        },
        profile.spawn,
        Activation { active: true },
        Controls { enabled: true },
        ControlInput::default(),
        movement,
        shooting,
        health::new_health(config.tank.starting_health),
    ));

    profile.instance = Some(entity);
    entity
}

/// Move a tank back to `spawn` and cycle it off and on again.
pub fn reset_tank(world: &mut World, entity: Entity, spawn: Pose) {
    if let Ok(mut pose) = world.get::<&mut Pose>(entity) {
        *pose = spawn;
    }
    deactivate(world, entity);
    activate(world, entity);
}

/// Take a tank off the field.
pub fn deactivate(world: &mut World, entity: Entity) {
    if let Ok(mut activation) = world.get::<&mut Activation>(entity) {
        activation.active = false;
    }
}

/// Put a tank on the field: full health, fresh drive input and charge.
pub fn activate(world: &mut World, entity: Entity) {
    let Ok((activation, health, movement, shooting)) = world.query_one_mut::<(
        &mut Activation,
        &mut Health,
        &mut Movement,
        &mut Shooting,
    )>(entity) else {
        return;
    };

    if activation.active {
        return;
    }
    activation.active = true;

    health::reset(health);
    reset_drive_input(movement);
    reset_charge(shooting);
}

/// Enable or disable player control. Enabling resets drive input and charge;
/// the `fired` latch is left untouched.
pub fn set_controls(world: &mut World, entity: Entity, enabled: bool) {
    let Ok((controls, movement, shooting)) =
        world.query_one_mut::<(&mut Controls, &mut Movement, &mut Shooting)>(entity)
    else {
        return;
    };

    let was_enabled = controls.enabled;
    controls.enabled = enabled;

    if enabled && !was_enabled {
        reset_drive_input(movement);
        reset_charge(shooting);
    }
}

fn reset_drive_input(movement: &mut Movement) {
    movement.throttle_input = 0.0;
    movement.turn_input = 0.0;
}

fn reset_charge(shooting: &mut Shooting) {
    shooting.current_launch_force = shooting.min_launch_force;
    shooting.aim_slider = shooting.min_launch_force;
}
