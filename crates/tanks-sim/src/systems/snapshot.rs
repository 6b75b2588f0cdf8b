//! Builds the per-tick `GameStateSnapshot` from the tank world.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use tanks_core::components::*;
use tanks_core::events::GameEvent;
use tanks_core::state::*;
use tanks_core::types::{Pose, SimTime};

use crate::camera::CameraRig;
use crate::health;
use crate::round::RoundController;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    round: &RoundController,
    camera: &CameraRig,
    time: &SimTime,
    paused: bool,
    message: &str,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        paused,
        phase: round.phase(),
        round: round.round_number(),
        message: message.to_string(),
        tanks: build_tanks(world, round),
        shells: build_shells(world),
        camera: camera.view(),
        game_winner: round.game_winner().map(|p| p.player),
        events,
    }
}

/// One view per profile, in player order. Profiles without a live tank are skipped.
fn build_tanks(world: &World, round: &RoundController) -> Vec<TankView> {
    round
        .profiles()
        .iter()
        .filter_map(|profile| {
            let entity = profile.instance?;
            let mut query = world
                .query_one::<(&Pose, &Activation, &Controls, &Health, &Shooting)>(entity)
                .ok()?;
            let (pose, activation, controls, health, shooting) = query.get()?;

            Some(TankView {
                player: profile.player,
                color: profile.color,
                label: profile.label.clone(),
                position: pose.position,
                rotation: pose.rotation,
                active: activation.active,
                controls_enabled: controls.enabled,
                health: health.current,
                health_fraction: health::fraction(health),
                health_bar_color: health::bar_color(health),
                life: health.life,
                aim_slider: shooting.aim_slider,
                wins: profile.wins,
            })
        })
        .collect()
}

fn build_shells(world: &World) -> Vec<ShellView> {
    let mut shells: Vec<ShellView> = world
        .query::<(&Shell, &ShellMotion)>()
        .iter()
        .map(|(_, (shell, motion))| ShellView {
            owner: shell.owner,
            position: motion.position,
            velocity: motion.velocity,
        })
        .collect();

    // Entity iteration order is an ECS detail; keep the output stable.
    shells.sort_by(|a, b| {
        a.owner
            .cmp(&b.owner)
            .then(a.position.x.total_cmp(&b.position.x))
            .then(a.position.z.total_cmp(&b.position.z))
    });
    shells
}
