#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::PlayerCommand;
    use crate::config::GameConfig;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::GameEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{Color, Pose, SimTime};

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.players.len(), 2);
        assert_eq!(config.rounds.rounds_to_win, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_combatants() {
        let config = GameConfig {
            players: Vec::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoCombatants));
    }

    #[test]
    fn test_config_rejects_zero_rounds_to_win() {
        let mut config = GameConfig::default();
        config.rounds.rounds_to_win = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroRoundsToWin));
    }

    #[test]
    fn test_config_rejects_bad_geometry() {
        let mut config = GameConfig::default();
        config.shell.explosion_radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "shell.explosion_radius",
                ..
            })
        ));

        let mut config = GameConfig::default();
        config.camera.aspect = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "camera.aspect",
                ..
            })
        ));

        let mut config = GameConfig::default();
        config.rounds.end_delay_secs = -0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { .. })
        ));
    }

    #[test]
    fn test_config_rejects_inverted_launch_force() {
        let mut config = GameConfig::default();
        config.weapon.min_launch_force = 40.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::LaunchForceRange {
                min: 40.0,
                max: 30.0
            })
        );
    }

    #[test]
    fn test_config_rejects_nan_max_launch_force() {
        let mut config = GameConfig::default();
        config.weapon.max_launch_force = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "weapon.max_launch_force",
                ..
            })
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{ "seed": 7, "rounds": { "rounds_to_win": 3 } }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.rounds.rounds_to_win, 3);
        // Untouched fields keep their defaults.
        assert_eq!(config.rounds.start_delay_secs, 3.0);
        assert_eq!(config.players.len(), 2);
    }

    #[test]
    fn test_config_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_color_html_rgb() {
        assert_eq!(Color::RED.to_html_rgb(), "FF0000");
        assert_eq!(Color::from_rgb8(42, 100, 178).to_html_rgb(), "2A64B2");
        // Out-of-range channels clamp.
        assert_eq!(Color::new(2.0, -1.0, 0.5).to_html_rgb(), "FF0080");
    }

    #[test]
    fn test_color_lerp_clamps() {
        let mid = Color::RED.lerp(Color::GREEN, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.g - 0.5).abs() < 1e-6);
        assert_eq!(Color::RED.lerp(Color::GREEN, -3.0), Color::RED);
        assert_eq!(Color::RED.lerp(Color::GREEN, 3.0), Color::GREEN);
    }

    #[test]
    fn test_pose_forward_and_transform() {
        let pose = Pose::from_yaw(Vec3::new(1.0, 0.0, 2.0), 90.0);
        let fwd = pose.forward();
        assert!((fwd - Vec3::X).length() < 1e-5, "yaw 90 faces +x, got {fwd}");

        let world = pose.transform_point(Vec3::new(0.0, 1.0, 3.0));
        assert!((world - Vec3::new(4.0, 1.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..50 {
            time.advance(0.02);
        }
        assert_eq!(time.tick, 50);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Drive {
                player: 1,
                throttle: 1.0,
                turn: -0.5,
            },
            PlayerCommand::FireDown { player: 2 },
            PlayerCommand::FireUp { player: 2 },
            PlayerCommand::Pause,
            PlayerCommand::Resume,
            PlayerCommand::Restart,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, cmd);
        }
    }

    #[test]
    fn test_game_event_tagged_json() {
        let event = GameEvent::RoundEnded {
            round: 3,
            outcome: RoundOutcome::Winner(2),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"RoundEnded""#));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = GameStateSnapshot::default();
        assert_eq!(snap.phase, RoundPhase::Starting);
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.round, 0);
        assert!(back.tanks.is_empty());
    }
}
