//! Session driver.
//!
//! `SimulationEngine` owns the arena and the round controller. Each tick it
//! applies queued player commands, runs the tank and shell systems in a fixed
//! order, advances the round state machine and eases the camera, then returns
//! a `GameStateSnapshot`. Nothing here touches a clock or a renderer.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use tanks_core::commands::PlayerCommand;
use tanks_core::components::ControlInput;
use tanks_core::config::GameConfig;
use tanks_core::enums::RoundPhase;
use tanks_core::error::ConfigError;
use tanks_core::events::GameEvent;
use tanks_core::state::GameStateSnapshot;
use tanks_core::types::SimTime;

use crate::arena::Arena;
use crate::profile::CombatantProfile;
use crate::round::RoundController;
use crate::systems;

/// The simulation engine. Owns the world and all session state.
pub struct SimulationEngine {
    config: GameConfig,
    arena: Arena,
    round: RoundController,
    time: SimTime,
    paused: bool,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
}

impl SimulationEngine {
    /// Validate `config`, spawn every tank and enter the first round.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let (arena, round) = build_session(&config);
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        info!(
            players = config.players.len(),
            rounds_to_win = config.rounds.rounds_to_win,
            seed = config.seed,
            "session created"
        );

        Ok(Self {
            config,
            arena,
            round,
            time: SimTime::default(),
            paused: false,
            rng,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.advance(self.config.dt())
    }

    /// Advance by `dt` seconds and return the resulting snapshot.
    pub fn advance(&mut self, dt: f32) -> GameStateSnapshot {
        self.process_commands();

        if !self.paused {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = self.arena.take_events();
        self.build_snapshot(events)
    }

    /// Current view of the session without advancing it.
    ///
    /// Events raised since the last tick are included but stay pending, so
    /// the next tick's snapshot still reports them.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(self.arena.events.clone())
    }

    fn build_snapshot(&self, events: Vec<GameEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.arena.world,
            &self.round,
            &self.arena.camera,
            &self.time,
            self.paused,
            self.arena.message(),
            events,
        )
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn round_number(&self) -> u32 {
        self.round.round_number()
    }

    pub fn profiles(&self) -> &[CombatantProfile] {
        self.round.profiles()
    }

    pub fn round(&self) -> &RoundController {
        &self.round
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Mutable arena access for tests that stage situations directly.
    #[cfg(test)]
    pub(crate) fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Drive {
                player,
                throttle,
                turn,
            } => {
                self.with_input(player, |input| {
                    input.throttle = clamp_axis(throttle);
                    input.turn = clamp_axis(turn);
                });
            }
            PlayerCommand::FireDown { player } => {
                self.with_input(player, |input| {
                    if !input.fire_held {
                        input.fire_held = true;
                        input.fire_pressed = true;
                    }
                });
            }
            PlayerCommand::FireUp { player } => {
                self.with_input(player, |input| {
                    if input.fire_held {
                        input.fire_held = false;
                        input.fire_released = true;
                    }
                });
            }
            PlayerCommand::Pause => {
                self.paused = true;
            }
            PlayerCommand::Resume => {
                self.paused = false;
            }
            PlayerCommand::Restart => {
                self.restart_session();
            }
        }
    }

    /// Apply `f` to the control input of `player`'s tank.
    fn with_input(&mut self, player: u8, f: impl FnOnce(&mut ControlInput)) {
        let Some(entity) = self.round.profile(player).and_then(|p| p.instance) else {
            warn!(player, "command for unknown player ignored");
            return;
        };
        if let Ok(mut input) = self.arena.world.get::<&mut ControlInput>(entity) {
            f(&mut *input);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Drive
        systems::movement::run(
            &mut self.arena.world,
            &mut self.rng,
            &mut self.arena.events,
            dt,
        );
        // 2. Charge and fire
        let launches = systems::shooting::run(&mut self.arena.world, &mut self.arena.events, dt);
        for launch in launches {
            systems::shells::spawn(&mut self.arena.world, launch);
        }
        // 3. Shell flight and explosions
        systems::shells::run(
            &mut self.arena.world,
            &self.config.shell,
            &mut self.arena.events,
            &mut self.despawn_buffer,
            dt,
        );
        // 4. Round progression
        self.round.tick(dt, &mut self.arena);
        // 5. Camera framing
        let targets = self.arena.active_positions();
        self.arena.camera.fixed_update(&targets, dt);
        // 6. Session restart after a game winner
        if self.arena.take_restart_request() {
            self.restart_session();
        }
    }

    /// Discard the world and profiles and begin a fresh game.
    fn restart_session(&mut self) {
        let carried = self.arena.take_events();
        let (arena, round) = build_session(&self.config);
        self.arena = arena;
        self.round = round;

        let fresh = self.arena.take_events();
        self.arena.events.extend(carried);
        self.arena.events.push(GameEvent::SessionRestarted);
        self.arena.events.extend(fresh);
        info!("session restarted");
    }
}

/// Spawn the tanks and enter round one.
fn build_session(config: &GameConfig) -> (Arena, RoundController) {
    let mut profiles: Vec<CombatantProfile> = config
        .players
        .iter()
        .enumerate()
        .map(|(i, slot)| CombatantProfile::new((i + 1) as u8, slot))
        .collect();

    let mut arena = Arena::new(config);
    arena.spawn_all(&mut profiles, config);

    let mut round = RoundController::new(profiles, &config.rounds);
    round.begin(&mut arena);
    (arena, round)
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}
