//! The arena: ECS world, camera rig and message display for one session.
//!
//! Implements [`RoundHost`] so the round controller can drive it.

use glam::Vec3;
use hecs::World;

use tanks_core::components::{Activation, Tank};
use tanks_core::config::GameConfig;
use tanks_core::events::GameEvent;
use tanks_core::types::Pose;

use crate::camera::CameraRig;
use crate::profile::CombatantProfile;
use crate::round::RoundHost;
use crate::world_setup;

/// Everything a session mutates besides the round controller.
pub struct Arena {
    pub world: World,
    pub camera: CameraRig,
    /// Events gathered since the last snapshot.
    pub events: Vec<GameEvent>,
    message: String,
    restart_requested: bool,
}

impl Arena {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            world: World::new(),
            camera: CameraRig::new(&config.camera),
            message: String::new(),
            events: Vec::new(),
            restart_requested: false,
        }
    }

    /// Spawn one tank per profile.
    pub fn spawn_all(&mut self, profiles: &mut [CombatantProfile], config: &GameConfig) {
        for profile in profiles.iter_mut() {
            world_setup::spawn_tank(&mut self.world, profile, config);
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Drain the events gathered since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True once after the round controller asked for a restart.
    pub fn take_restart_request(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    /// Positions of every active tank.
    pub fn active_positions(&self) -> Vec<Vec3> {
        active_tank_positions(&self.world)
    }
}

/// Positions of every active tank, in entity order.
pub fn active_tank_positions(world: &World) -> Vec<Vec3> {
    world
        .query::<(&Tank, &Activation, &Pose)>()
        .iter()
        .filter(|(_, (_, activation, _))| activation.active)
        .map(|(_, (_, _, pose))| pose.position)
        .collect()
}

impl RoundHost for Arena {
    fn reset_combatants(&mut self, profiles: &[CombatantProfile]) {
        for profile in profiles {
            if let Some(entity) = profile.instance {
                world_setup::reset_tank(&mut self.world, entity, profile.spawn);
            }
        }
    }

    fn set_controls_enabled(&mut self, profiles: &[CombatantProfile], enabled: bool) {
        for entity in profiles.iter().filter_map(|p| p.instance) {
            world_setup::set_controls(&mut self.world, entity, enabled);
        }
    }

    fn snap_camera(&mut self, _profiles: &[CombatantProfile]) {
        let targets = self.active_positions();
        self.camera.snap(&targets);
    }

    fn is_active(&self, profile: &CombatantProfile) -> bool {
        profile
            .instance
            .and_then(|entity| self.world.get::<&Activation>(entity).ok().map(|a| a.active))
            .unwrap_or(false)
    }

    fn show_message(&mut self, text: String) {
        self.message = text;
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn restart_session(&mut self) {
        self.restart_requested = true;
    }
}
