//! Health tracker: damage intake and the one-way Alive -> Dead transition.

use tanks_core::components::Health;
use tanks_core::enums::LifeState;
use tanks_core::types::Color;

/// Result of applying damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub remaining: f32,
    /// True only on the hit that killed the tank.
    pub died: bool,
}

/// Fresh tracker at full health.
pub fn new_health(starting: f32) -> Health {
    Health {
        starting,
        current: starting,
        life: LifeState::Alive,
    }
}

/// Back to full health and alive. Runs on every activation.
pub fn reset(health: &mut Health) {
    health.current = health.starting;
    health.life = LifeState::Alive;
}

/// Subtract `amount`. Reports `died` once, on the transition into Dead.
pub fn apply_damage(health: &mut Health, amount: f32) -> DamageOutcome {
    health.current -= amount;

    let died = health.current <= 0.0 && health.life == LifeState::Alive;
    if died {
        health.life = LifeState::Dead;
    }

    DamageOutcome {
        remaining: health.current,
        died,
    }
}

/// Current health as a share of starting health.
pub fn fraction(health: &Health) -> f32 {
    if health.starting <= 0.0 {
        return 0.0;
    }
    health.current / health.starting
}

/// Health bar fill: red when empty, green when full.
pub fn bar_color(health: &Health) -> Color {
    Color::RED.lerp(Color::GREEN, fraction(health))
}
