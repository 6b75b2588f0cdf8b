//! Round controller: the Starting -> Playing -> Ending cycle.
//!
//! Phases run as an explicit state machine driven by `tick(dt)`. Waits are
//! plain second counters. When a phase finishes, the next phase's entry
//! actions run in the same tick. All effects go through [`RoundHost`].

use tracing::info;

use tanks_core::config::RoundConfig;
use tanks_core::enums::{RoundOutcome, RoundPhase};
use tanks_core::events::GameEvent;

use crate::profile::CombatantProfile;

/// Tolerance for wait counters reaching zero.
const WAIT_EPSILON: f32 = 1e-4;

/// Collaborators the round controller drives.
pub trait RoundHost {
    /// Put every combatant back on its spawn pose at full health.
    fn reset_combatants(&mut self, profiles: &[CombatantProfile]);

    /// Let player input drive the combatants, or lock it out.
    fn set_controls_enabled(&mut self, profiles: &[CombatantProfile], enabled: bool);

    /// Jump the framing camera to cover the active combatants.
    fn snap_camera(&mut self, profiles: &[CombatantProfile]);

    /// Whether the combatant is still in the round.
    fn is_active(&self, profile: &CombatantProfile) -> bool;

    /// Replace the central message text.
    fn show_message(&mut self, text: String);

    fn emit(&mut self, event: GameEvent);

    /// Discard the session and start again from the initial state.
    fn restart_session(&mut self);
}

/// Owns the combatant profiles and the round/game progression.
#[derive(Debug, Clone)]
pub struct RoundController {
    profiles: Vec<CombatantProfile>,
    phase: RoundPhase,
    round_number: u32,
    round_winner: Option<usize>,
    game_winner: Option<usize>,
    wait_remaining: f32,
    rounds_to_win: u32,
    start_delay: f32,
    end_delay: f32,
}

impl RoundController {
    pub fn new(profiles: Vec<CombatantProfile>, config: &RoundConfig) -> Self {
        Self {
            profiles,
            phase: RoundPhase::Starting,
            round_number: 0,
            round_winner: None,
            game_winner: None,
            wait_remaining: 0.0,
            rounds_to_win: config.rounds_to_win,
            start_delay: config.start_delay_secs,
            end_delay: config.end_delay_secs,
        }
    }

    /// Run the entry actions of the first round.
    pub fn begin(&mut self, host: &mut impl RoundHost) {
        self.enter_starting(host);
    }

    /// Advance the state machine by `dt` seconds.
    pub fn tick(&mut self, dt: f32, host: &mut impl RoundHost) {
        match self.phase {
            RoundPhase::Starting => {
                if self.count_down(dt) {
                    self.enter_playing(host);
                }
            }
            RoundPhase::Playing => {
                if self.one_or_none_left(&*host) {
                    self.enter_ending(host);
                }
            }
            RoundPhase::Ending => {
                if self.count_down(dt) {
                    self.finish_round(host);
                }
            }
            RoundPhase::GameOver => {}
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn profiles(&self) -> &[CombatantProfile] {
        &self.profiles
    }

    /// Profile for a 1-based player number.
    pub fn profile(&self, player: u8) -> Option<&CombatantProfile> {
        self.profiles.iter().find(|p| p.player == player)
    }

    pub fn round_winner(&self) -> Option<&CombatantProfile> {
        self.round_winner.map(|i| &self.profiles[i])
    }

    pub fn game_winner(&self) -> Option<&CombatantProfile> {
        self.game_winner.map(|i| &self.profiles[i])
    }

    fn count_down(&mut self, dt: f32) -> bool {
        self.wait_remaining -= dt;
        self.wait_remaining <= WAIT_EPSILON
    }

    fn enter_starting(&mut self, host: &mut impl RoundHost) {
        self.phase = RoundPhase::Starting;

        host.reset_combatants(&self.profiles);
        host.set_controls_enabled(&self.profiles, false);
        host.snap_camera(&self.profiles);

        self.round_number += 1;
        host.show_message(format!("ROUND {}", self.round_number));
        host.emit(GameEvent::RoundStarted {
            round: self.round_number,
        });
        info!(round = self.round_number, "round starting");

        self.wait_remaining = self.start_delay;
    }

    fn enter_playing(&mut self, host: &mut impl RoundHost) {
        self.phase = RoundPhase::Playing;
        self.wait_remaining = 0.0;

        host.set_controls_enabled(&self.profiles, true);
        host.show_message(String::new());
        host.emit(GameEvent::RoundPlaying {
            round: self.round_number,
        });
        info!(round = self.round_number, "round playing");

        // The exit condition is checked on entry as well.
        if self.one_or_none_left(&*host) {
            self.enter_ending(host);
        }
    }

    fn enter_ending(&mut self, host: &mut impl RoundHost) {
        self.phase = RoundPhase::Ending;

        host.set_controls_enabled(&self.profiles, false);

        self.round_winner = self.find_round_winner(&*host);
        if let Some(i) = self.round_winner {
            self.profiles[i].wins += 1;
        }

        let had_game_winner = self.game_winner.is_some();
        self.game_winner = self.find_game_winner();

        let outcome = match self.round_winner {
            Some(i) => RoundOutcome::Winner(self.profiles[i].player),
            None => RoundOutcome::Draw,
        };
        host.emit(GameEvent::RoundEnded {
            round: self.round_number,
            outcome,
        });
        info!(round = self.round_number, ?outcome, "round ended");

        if let (false, Some(i)) = (had_game_winner, self.game_winner) {
            let player = self.profiles[i].player;
            host.emit(GameEvent::GameWon { player });
            info!(player, wins = self.profiles[i].wins, "game won");
        }

        host.show_message(self.end_message());
        self.wait_remaining = self.end_delay;
    }

    fn finish_round(&mut self, host: &mut impl RoundHost) {
        if self.game_winner.is_some() {
            self.phase = RoundPhase::GameOver;
            self.wait_remaining = 0.0;
            host.restart_session();
        } else {
            self.enter_starting(host);
        }
    }

    fn one_or_none_left(&self, host: &impl RoundHost) -> bool {
        self.active_count(host) <= 1
    }

    fn active_count(&self, host: &impl RoundHost) -> usize {
        self.profiles.iter().filter(|p| host.is_active(p)).count()
    }

    /// The sole active combatant, if exactly one remains.
    fn find_round_winner(&self, host: &impl RoundHost) -> Option<usize> {
        let mut active = self
            .profiles
            .iter()
            .enumerate()
            .filter(|(_, p)| host.is_active(p))
            .map(|(i, _)| i);

        match (active.next(), active.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        }
    }

    /// First profile whose wins equal the threshold.
    fn find_game_winner(&self) -> Option<usize> {
        self.profiles
            .iter()
            .position(|p| p.wins == self.rounds_to_win)
    }

    fn end_message(&self) -> String {
        if let Some(i) = self.game_winner {
            return format!("{} WINS THE GAME!", self.profiles[i].label);
        }

        let mut message = match self.round_winner {
            Some(i) => format!("{} WINS THE ROUND!", self.profiles[i].label),
            None => "DRAW!".to_string(),
        };
        message.push_str("\n\n\n\n");
        for profile in &self.profiles {
            message.push_str(&format!("{}: {} WINS\n", profile.label, profile.wins));
        }
        message
    }
}
