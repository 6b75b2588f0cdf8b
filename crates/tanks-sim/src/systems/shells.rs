//! Shell flight and explosions.
//!
//! Shells fly under gravity until they touch the ground or a tank hull, then
//! explode and damage every active tank inside the blast radius. Shells that
//! outlive their lifetime disappear without exploding.

use glam::Vec3;
use hecs::{Entity, World};
use tracing::debug;

use tanks_core::components::{Activation, Health, Shell, ShellMotion, Tank};
use tanks_core::config::ShellConfig;
use tanks_core::constants::{GRAVITY, TANK_HEIGHT, TANK_HIT_RADIUS};
use tanks_core::events::GameEvent;
use tanks_core::types::Pose;

use crate::damage::explosion_damage;
use crate::health;
use crate::world_setup;

/// A shell waiting to be spawned.
#[derive(Debug, Clone, Copy)]
pub struct ShellLaunch {
    pub owner: u8,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Spawn a shell entity.
pub fn spawn(world: &mut World, launch: ShellLaunch) -> Entity {
    world.spawn((
        Shell {
            owner: launch.owner,
            age_secs: 0.0,
        },
        ShellMotion {
            position: launch.position,
            velocity: launch.velocity,
        },
    ))
}

/// An active tank as seen by the blast checks.
#[derive(Debug, Clone, Copy)]
struct TankBody {
    entity: Entity,
    player: u8,
    position: Vec3,
}

/// Advance every shell one step and resolve explosions.
pub fn run(
    world: &mut World,
    config: &ShellConfig,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
    dt: f32,
) {
    despawn_buffer.clear();
    let mut detonations: Vec<(Entity, Vec3)> = Vec::new();

    {
        let bodies = active_tanks(world);
        for (entity, (shell, motion)) in world.query_mut::<(&mut Shell, &mut ShellMotion)>() {
            shell.age_secs += dt;
            if shell.age_secs >= config.max_lifetime_secs {
                despawn_buffer.push(entity);
                continue;
            }

            motion.velocity.y -= GRAVITY * dt;
            motion.position += motion.velocity * dt;

            let hit_tank = bodies
                .iter()
                .any(|body| touches_hull(motion.position, body.position));
            if hit_tank || touches_ground(motion.position) {
                detonations.push((entity, motion.position));
            }
        }
    }

    for (entity, position) in detonations {
        explode(world, config, position, events);
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Damage every active tank near `blast` and report the explosion.
pub fn explode(world: &mut World, config: &ShellConfig, blast: Vec3, events: &mut Vec<GameEvent>) {
    let reach = config.explosion_radius + TANK_HIT_RADIUS;

    for body in active_tanks(world) {
        let distance = body.position.distance(blast);
        if distance > reach {
            continue;
        }

        let amount = explosion_damage(distance, config.explosion_radius, config.max_damage);
        let outcome = match world.get::<&mut Health>(body.entity) {
            Ok(mut health) => health::apply_damage(&mut health, amount),
            Err(_) => continue,
        };

        events.push(GameEvent::TankDamaged {
            player: body.player,
            amount,
            remaining: outcome.remaining,
        });

        if outcome.died {
            world_setup::deactivate(world, body.entity);
            events.push(GameEvent::TankDestroyed {
                player: body.player,
                position: body.position,
            });
            debug!(player = body.player, "tank destroyed");
        }
    }

    events.push(GameEvent::ShellExploded {
        position: blast,
        force: config.explosion_force,
        radius: config.explosion_radius,
    });
}

fn active_tanks(world: &World) -> Vec<TankBody> {
    world
        .query::<(&Tank, &Activation, &Pose)>()
        .iter()
        .filter(|(_, (_, activation, _))| activation.active)
        .map(|(entity, (tank, _, pose))| TankBody {
            entity,
            player: tank.player,
            position: pose.position,
        })
        .collect()
}

fn touches_ground(position: Vec3) -> bool {
    position.y <= 0.0
}

fn touches_hull(shell: Vec3, tank: Vec3) -> bool {
    let dx = shell.x - tank.x;
    let dz = shell.z - tank.z;
    dx * dx + dz * dz <= TANK_HIT_RADIUS * TANK_HIT_RADIUS
        && shell.y >= tank.y
        && shell.y <= tank.y + TANK_HEIGHT
}
