//! Game loop thread: owns the simulation engine and hands back snapshots.
//!
//! Commands arrive via an `mpsc` channel. Every tick's snapshot is sent back
//! on a second channel. In realtime pacing the loop ticks on the wall clock;
//! in lockstep pacing it ticks once per `Step`, which keeps headless runs
//! deterministic.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use tanks_core::state::GameStateSnapshot;
use tanks_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// How the loop paces ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Tick at the configured rate on the wall clock.
    Realtime,
    /// Tick once per [`GameLoopCommand::Step`].
    Lockstep,
}

/// Channels to a running game loop plus its thread.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub snapshots: mpsc::Receiver<GameStateSnapshot>,
    thread: JoinHandle<u64>,
}

impl GameLoopHandle {
    /// Stop the loop and wait for it. Returns the number of ticks it ran.
    pub fn shutdown(self) -> std::thread::Result<u64> {
        let GameLoopHandle {
            commands,
            snapshots,
            thread,
        } = self;
        let _ = commands.send(GameLoopCommand::Shutdown);
        drop(snapshots);
        thread.join()
    }
}

/// Spawns the game loop in a new thread, taking ownership of `engine`.
pub fn spawn_game_loop(engine: SimulationEngine, pacing: Pacing) -> std::io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (snap_tx, snap_rx) = mpsc::channel::<GameStateSnapshot>();

    let thread = std::thread::Builder::new()
        .name("tanks-game-loop".into())
        .spawn(move || run_game_loop(engine, pacing, cmd_rx, snap_tx))?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        snapshots: snap_rx,
        thread,
    })
}

/// Nominal duration of one tick for `engine`'s tick rate.
pub fn tick_duration(engine: &SimulationEngine) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(engine.config().tick_rate.max(1)))
}

/// The game loop. Runs until Shutdown, channel disconnect, or nobody is
/// listening for snapshots. Returns the number of ticks run.
fn run_game_loop(
    mut engine: SimulationEngine,
    pacing: Pacing,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    snap_tx: mpsc::Sender<GameStateSnapshot>,
) -> u64 {
    let period = tick_duration(&engine);
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;
    info!(?pacing, "game loop started");

    loop {
        // 1. Gather commands for this tick
        let keep_running = match pacing {
            Pacing::Realtime => drain_commands(&mut engine, &cmd_rx),
            Pacing::Lockstep => wait_for_step(&mut engine, &cmd_rx),
        };
        if !keep_running {
            break;
        }

        // 2. Advance one tick
        let snapshot = engine.tick();
        ticks += 1;

        // 3. Hand the snapshot over
        if snap_tx.send(snapshot).is_err() {
            debug!("snapshot receiver dropped");
            break;
        }

        // 4. Sleep until next tick
        if pacing == Pacing::Realtime {
            next_tick_time += period;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > period * 2 {
                // Too far behind; skip ahead instead of catching up.
                next_tick_time = now;
            }
        }
    }

    info!(ticks, "game loop stopped");
    ticks
}

/// Queue everything pending without blocking. False when the loop should stop.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Step) => {}
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// Queue commands until a `Step` arrives. False when the loop should stop.
fn wait_for_step(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Step) => return true,
            Ok(GameLoopCommand::Shutdown) | Err(_) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanks_core::commands::PlayerCommand;
    use tanks_core::config::GameConfig;
    use tanks_core::enums::RoundPhase;

    fn engine() -> SimulationEngine {
        SimulationEngine::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::FireDown { player: 1 }))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::FireDown { player: 1 })
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_lockstep_ticks_once_per_step() {
        let handle = spawn_game_loop(engine(), Pacing::Lockstep).unwrap();

        for expected in 1..=10u64 {
            handle.commands.send(GameLoopCommand::Step).unwrap();
            let snap = handle.snapshots.recv().unwrap();
            assert_eq!(snap.time.tick, expected);
        }
        assert!(handle.snapshots.try_recv().is_err(), "no tick without a step");

        assert_eq!(handle.shutdown().unwrap(), 10);
    }

    #[test]
    fn test_lockstep_forwards_commands_before_tick() {
        let handle = spawn_game_loop(engine(), Pacing::Lockstep).unwrap();

        handle
            .commands
            .send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        handle.commands.send(GameLoopCommand::Step).unwrap();
        let snap = handle.snapshots.recv().unwrap();
        assert!(snap.paused);
        assert_eq!(snap.time.tick, 0);
        assert_eq!(snap.phase, RoundPhase::Starting);

        handle.shutdown().unwrap();
    }

    #[test]
    fn test_realtime_loop_runs_until_shutdown() {
        let handle = spawn_game_loop(engine(), Pacing::Realtime).unwrap();
        let first = handle
            .snapshots
            .recv_timeout(Duration::from_secs(2))
            .unwrap();
        assert!(first.time.tick >= 1);

        let ticks = handle.shutdown().unwrap();
        assert!(ticks >= 1);
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = engine();
        for _ in 0..200 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_matches_rate() {
        // 50Hz = 20ms per tick
        assert_eq!(tick_duration(&engine()), Duration::from_millis(20));
    }
}
