//! Bot pilots for headless play.
//!
//! Each bot turns toward the nearest active opponent, drives while roughly
//! facing it, and charges a shot whose force grows with the distance.

use std::f32::consts::{FRAC_PI_4, PI};

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tanks_core::commands::PlayerCommand;
use tanks_core::config::WeaponConfig;
use tanks_core::constants::{FIRE_ELEVATION_DEGREES, FIRE_POINT_OFFSET, GRAVITY};
use tanks_core::state::{GameStateSnapshot, TankView};

/// Stop closing in inside this range.
const PREFERRED_RANGE: f32 = 18.0;
/// Back off inside this range.
const TOO_CLOSE: f32 = 7.0;
/// Drive only when the heading error is below this.
const DRIVE_CONE: f32 = PI / 6.0;
/// Start charging only when the heading error is below this.
const AIM_CONE: f32 = PI / 18.0;

/// One bot per player.
#[derive(Debug, Clone)]
pub struct BotPilot {
    player: u8,
    rng: ChaCha8Rng,
    min_force: f32,
    max_force: f32,
    max_charge_time: f32,
    dt: f32,
    charging: Option<Charge>,
    cooldown: f32,
}

#[derive(Debug, Clone, Copy)]
struct Charge {
    target_force: f32,
    elapsed: f32,
}

impl BotPilot {
    pub fn new(player: u8, seed: u64, weapon: &WeaponConfig, dt: f32) -> Self {
        Self {
            player,
            rng: ChaCha8Rng::seed_from_u64(seed),
            min_force: weapon.min_launch_force,
            max_force: weapon.max_launch_force,
            max_charge_time: weapon.max_charge_time,
            dt,
            charging: None,
            cooldown: 0.0,
        }
    }

    /// Commands for the next tick given the latest snapshot.
    pub fn decide(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let Some(me) = snapshot.tanks.iter().find(|t| t.player == self.player) else {
            return Vec::new();
        };

        if !me.active || !me.controls_enabled {
            self.cooldown = 0.0;
            return match self.charging.take() {
                Some(_) => vec![PlayerCommand::FireUp {
                    player: self.player,
                }],
                None => Vec::new(),
            };
        }

        self.cooldown = (self.cooldown - self.dt).max(0.0);

        let Some(target) = nearest_opponent(me, &snapshot.tanks) else {
            return vec![self.drive(0.0, 0.0)];
        };

        let offset = target.position - me.position;
        let distance = Vec3::new(offset.x, 0.0, offset.z).length();
        let error = heading_error(me, target.position);

        let turn = (error / FRAC_PI_4).clamp(-1.0, 1.0);
        let throttle = if distance < TOO_CLOSE {
            -0.5
        } else if distance > PREFERRED_RANGE && error.abs() < DRIVE_CONE {
            1.0
        } else {
            0.0
        };

        let mut commands = vec![self.drive(throttle, turn)];
        commands.extend(self.update_fire(me, distance, error));
        commands
    }

    fn drive(&self, throttle: f32, turn: f32) -> PlayerCommand {
        PlayerCommand::Drive {
            player: self.player,
            throttle,
            turn,
        }
    }

    fn update_fire(&mut self, me: &TankView, distance: f32, error: f32) -> Option<PlayerCommand> {
        match self.charging.as_mut() {
            Some(charge) => {
                charge.elapsed += self.dt;
                // A full charge fires by itself; stop holding after that.
                let done = me.aim_slider >= charge.target_force
                    || charge.elapsed > self.max_charge_time + self.dt * 2.0;
                if !done {
                    return None;
                }
                self.charging = None;
                self.cooldown = self.rng.gen_range(0.5..1.5);
                Some(PlayerCommand::FireUp {
                    player: self.player,
                })
            }
            None if self.cooldown <= 0.0 && error.abs() < AIM_CONE => {
                let jitter = self.rng.gen_range(-1.0..1.0);
                let target_force = (launch_force_for_distance(distance) + jitter)
                    .clamp(self.min_force, self.max_force);
                self.charging = Some(Charge {
                    target_force,
                    elapsed: 0.0,
                });
                Some(PlayerCommand::FireDown {
                    player: self.player,
                })
            }
            None => None,
        }
    }
}

/// Launch force that lands a shell `distance` units ahead of the hull centre.
///
/// The shell leaves from the muzzle, which sits above and in front of the
/// hull, so the ground range is measured from there and the fall starts at
/// muzzle height. Zero when the target is inside the muzzle offset.
pub fn launch_force_for_distance(distance: f32) -> f32 {
    let [_, height, forward] = FIRE_POINT_OFFSET;
    let range = distance - forward;
    if range <= 0.0 {
        return 0.0;
    }

    // y(range) = height + range * tan(a) - g * range^2 / (2 * v^2 * cos^2(a)) = 0
    let angle = FIRE_ELEVATION_DEGREES.to_radians();
    let rise = height + range * angle.tan();
    range / angle.cos() * (GRAVITY / (2.0 * rise)).sqrt()
}

/// Signed yaw from `me`'s heading to `target`, in radians within [-pi, pi].
/// Positive means turn right (toward +x when facing +z).
pub fn heading_error(me: &TankView, target: Vec3) -> f32 {
    let forward = me.rotation * Vec3::Z;
    let to = target - me.position;
    let wanted = to.x.atan2(to.z);
    let current = forward.x.atan2(forward.z);
    wrap_angle(wanted - current)
}

fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

fn nearest_opponent<'a>(me: &TankView, tanks: &'a [TankView]) -> Option<&'a TankView> {
    tanks
        .iter()
        .filter(|t| t.player != me.player && t.active)
        .min_by(|a, b| {
            let da = a.position.distance_squared(me.position);
            let db = b.position.distance_squared(me.position);
            da.total_cmp(&db)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use tanks_core::config::GameConfig;
    use tanks_core::enums::LifeState;
    use tanks_core::events::GameEvent;
    use tanks_core::types::{Color, Pose};
    use tanks_sim::systems::shooting;
    use tanks_sim::SimulationEngine;

    fn view(player: u8, position: Vec3, yaw_degrees: f32) -> TankView {
        TankView {
            player,
            color: Color::RED,
            label: String::new(),
            position,
            rotation: Quat::from_rotation_y(yaw_degrees.to_radians()),
            active: true,
            controls_enabled: true,
            health: 100.0,
            health_fraction: 1.0,
            health_bar_color: Color::GREEN,
            life: LifeState::Alive,
            aim_slider: 15.0,
            wins: 0,
        }
    }

    fn bot(player: u8) -> BotPilot {
        let config = GameConfig::default();
        BotPilot::new(player, 7, &config.weapon, config.dt())
    }

    #[test]
    fn test_heading_error_sign() {
        let me = view(1, Vec3::ZERO, 0.0);
        assert!(heading_error(&me, Vec3::new(5.0, 0.0, 5.0)) > 0.0);
        assert!(heading_error(&me, Vec3::new(-5.0, 0.0, 5.0)) < 0.0);
        assert!(heading_error(&me, Vec3::new(0.0, 0.0, 5.0)).abs() < 1e-5);
        assert!((heading_error(&me, Vec3::new(0.0, 0.0, -5.0)).abs() - PI).abs() < 1e-4);
    }

    #[test]
    fn test_launch_force_grows_with_distance() {
        let near = launch_force_for_distance(8.0);
        let far = launch_force_for_distance(30.0);
        assert!(far > near);
        assert_eq!(launch_force_for_distance(1.0), 0.0);
        assert_eq!(launch_force_for_distance(-1.0), 0.0);
    }

    /// Fly a shell the way the shell system does and return where it lands.
    fn landing_distance(launch_force: f32) -> f32 {
        let pose = Pose::from_yaw(Vec3::ZERO, 0.0);
        let (mut position, direction) = shooting::muzzle(&pose);
        let mut velocity = direction * launch_force;
        let dt = GameConfig::default().dt();
        while position.y > 0.0 {
            velocity.y -= GRAVITY * dt;
            position += velocity * dt;
        }
        position.z
    }

    #[test]
    fn test_launch_force_lands_on_target() {
        for distance in [15.0, 17.7, 22.0, 28.0] {
            let force = launch_force_for_distance(distance);
            let landed = landing_distance(force);
            assert!(
                (landed - distance).abs() < 1.0,
                "aimed at {distance}, landed at {landed} with force {force}"
            );
        }
    }

    #[test]
    fn test_bot_turns_toward_opponent() {
        let mut pilot = bot(1);
        let snapshot = GameStateSnapshot {
            tanks: vec![view(1, Vec3::ZERO, 0.0), view(2, Vec3::new(30.0, 0.0, 0.0), 0.0)],
            ..Default::default()
        };
        let commands = pilot.decide(&snapshot);
        match commands[0] {
            PlayerCommand::Drive { turn, throttle, .. } => {
                assert_eq!(turn, 1.0);
                assert_eq!(throttle, 0.0, "no driving while facing away");
            }
            ref other => panic!("expected Drive, got {other:?}"),
        }
    }

    #[test]
    fn test_bot_charges_when_aimed() {
        let mut pilot = bot(1);
        let snapshot = GameStateSnapshot {
            tanks: vec![view(1, Vec3::ZERO, 0.0), view(2, Vec3::new(0.0, 0.0, 25.0), 0.0)],
            ..Default::default()
        };
        let commands = pilot.decide(&snapshot);
        assert!(commands.contains(&PlayerCommand::FireDown { player: 1 }));
        assert!(commands.contains(&PlayerCommand::Drive {
            player: 1,
            throttle: 1.0,
            turn: 0.0,
        }));
    }

    #[test]
    fn test_bot_idle_without_controls() {
        let mut pilot = bot(1);
        let mut me = view(1, Vec3::ZERO, 0.0);
        me.controls_enabled = false;
        let snapshot = GameStateSnapshot {
            tanks: vec![me, view(2, Vec3::new(0.0, 0.0, 25.0), 0.0)],
            ..Default::default()
        };
        assert!(pilot.decide(&snapshot).is_empty());
    }

    #[test]
    fn test_bots_fire_in_a_real_session() {
        let config = GameConfig::default();
        let dt = config.dt();
        let mut engine = SimulationEngine::new(config.clone()).unwrap();
        let mut pilots: Vec<BotPilot> = (1..=2)
            .map(|p| BotPilot::new(p, u64::from(p), &config.weapon, dt))
            .collect();

        let mut fired = 0;
        let mut snapshot = engine.tick();
        for _ in 0..1500 {
            for pilot in &mut pilots {
                engine.queue_commands(pilot.decide(&snapshot));
            }
            snapshot = engine.tick();
            fired += snapshot
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::ShellFired { .. }))
                .count();
        }
        assert!(fired > 0, "bots never fired");
    }

    #[test]
    fn test_bots_finish_a_round() {
        let config = GameConfig::default();
        let dt = config.dt();
        let mut engine = SimulationEngine::new(config.clone()).unwrap();
        let mut pilots: Vec<BotPilot> = (1..=2)
            .map(|p| BotPilot::new(p, config.seed.wrapping_add(u64::from(p)), &config.weapon, dt))
            .collect();

        let mut damaged = 0;
        let mut snapshot = engine.tick();
        for _ in 0..6000 {
            for pilot in &mut pilots {
                engine.queue_commands(pilot.decide(&snapshot));
            }
            snapshot = engine.tick();
            damaged += snapshot
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::TankDamaged { .. }))
                .count();
            if snapshot
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::RoundEnded { .. }))
            {
                return;
            }
        }
        panic!("no round ended in 6000 ticks ({damaged} hits)");
    }
}
