//! State shared between the runner and the game loop thread.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use tanks_core::commands::PlayerCommand;
use tanks_core::enums::RoundOutcome;
use tanks_core::events::GameEvent;
use tanks_core::state::GameStateSnapshot;

/// Commands sent from the runner to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Advance one tick. Only meaningful in lockstep pacing.
    Step,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Running totals gathered from snapshot events.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub ticks: u64,
    pub games_completed: u32,
    pub rounds_played: u32,
    pub draws: u32,
    pub round_wins: BTreeMap<u8, u32>,
    pub game_wins: BTreeMap<u8, u32>,
    pub shells_fired: u32,
    pub tanks_destroyed: u32,
}

impl RunStats {
    /// Fold one tick's snapshot into the totals.
    pub fn record(&mut self, snapshot: &GameStateSnapshot) {
        self.ticks += 1;
        for event in &snapshot.events {
            match event {
                GameEvent::RoundEnded { outcome, .. } => {
                    self.rounds_played += 1;
                    match outcome {
                        RoundOutcome::Winner(player) => {
                            *self.round_wins.entry(*player).or_default() += 1;
                        }
                        RoundOutcome::Draw => self.draws += 1,
                    }
                }
                GameEvent::GameWon { player } => {
                    self.games_completed += 1;
                    *self.game_wins.entry(*player).or_default() += 1;
                }
                GameEvent::ShellFired { .. } => self.shells_fired += 1,
                GameEvent::TankDestroyed { .. } => self.tanks_destroyed += 1,
                _ => {}
            }
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticks:           {}", self.ticks)?;
        writeln!(f, "games completed: {}", self.games_completed)?;
        writeln!(f, "rounds played:   {} ({} draws)", self.rounds_played, self.draws)?;
        writeln!(f, "shells fired:    {}", self.shells_fired)?;
        writeln!(f, "tanks destroyed: {}", self.tanks_destroyed)?;
        for (player, wins) in &self.round_wins {
            let games = self.game_wins.get(player).copied().unwrap_or(0);
            writeln!(f, "player {player}: {wins} rounds, {games} games")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(events: Vec<GameEvent>) -> GameStateSnapshot {
        GameStateSnapshot {
            events,
            ..Default::default()
        }
    }

    #[test]
    fn test_stats_count_events() {
        let mut stats = RunStats::default();
        stats.record(&snapshot_with(vec![GameEvent::ShellFired {
            player: 1,
            launch_force: 20.0,
        }]));
        stats.record(&snapshot_with(vec![
            GameEvent::RoundEnded {
                round: 1,
                outcome: RoundOutcome::Winner(2),
            },
            GameEvent::GameWon { player: 2 },
        ]));
        stats.record(&snapshot_with(vec![GameEvent::RoundEnded {
            round: 2,
            outcome: RoundOutcome::Draw,
        }]));

        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.shells_fired, 1);
        assert_eq!(stats.rounds_played, 2);
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.round_wins.get(&2), Some(&1));
        assert_eq!(stats.game_wins.get(&2), Some(&1));
        assert_eq!(stats.games_completed, 1);
    }

    #[test]
    fn test_stats_json_summary() {
        let mut stats = RunStats::default();
        stats.record(&snapshot_with(vec![
            GameEvent::RoundEnded {
                round: 1,
                outcome: RoundOutcome::Winner(1),
            },
            GameEvent::GameWon { player: 1 },
        ]));

        let json: serde_json::Value = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["ticks"], 1);
        assert_eq!(json["games_completed"], 1);
        assert_eq!(json["round_wins"]["1"], 1);
        assert_eq!(json["game_wins"]["1"], 1);
    }

    #[test]
    fn test_stats_display_lists_players() {
        let mut stats = RunStats::default();
        stats.round_wins.insert(1, 4);
        let text = stats.to_string();
        assert!(text.contains("player 1: 4 rounds, 0 games"));
    }
}
