//! Per-player profile owned by the round controller.

use tanks_core::config::PlayerSlot;
use tanks_core::types::{Color, Pose};

/// Everything the round controller knows about one player slot.
#[derive(Debug, Clone)]
pub struct CombatantProfile {
    /// 1-based player number.
    pub player: u8,
    pub color: Color,
    pub spawn: Pose,
    /// Rounds won this session.
    pub wins: u32,
    /// Live tank entity. `None` before spawn.
    pub instance: Option<hecs::Entity>,
    /// Colour-tagged "PLAYER n" used in messages.
    pub label: String,
}

impl CombatantProfile {
    pub fn new(player: u8, slot: &PlayerSlot) -> Self {
        Self {
            player,
            color: slot.color,
            spawn: slot.spawn,
            wins: 0,
            instance: None,
            label: colored_player_text(player, slot.color),
        }
    }
}

/// `<color=#RRGGBB>PLAYER n</color>`
pub fn colored_player_text(player: u8, color: Color) -> String {
    format!("<color=#{}>PLAYER {}</color>", color.to_html_rgb(), player)
}
