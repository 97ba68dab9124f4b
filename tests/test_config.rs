use std::io::Write;

use sprite_shooter::config::*;

#[test]
fn defaults_match_the_classic_game() {
    let rules = Rules::default();
    assert_eq!((rules.width, rules.height), (800, 600));
    assert_eq!(rules.tick_rate_hz, 60);
    assert_eq!(rules.fire_interval().as_millis(), 300);
    assert_eq!(rules.assist_duration().as_secs(), 7);
    assert_eq!(rules.spawn_chance, 0.02);
    assert_eq!(rules.bonus_chance, 0.25);
    assert!(rules.validate().is_ok());

    let config = GameConfig::default();
    assert!(config.sound);
    assert!(config.log_file.is_none());
}

#[test]
fn validate_rejects_bad_rules() {
    let cases = [
        Rules { spawn_chance: 1.5, ..Rules::default() },
        Rules { bonus_chance: -0.1, ..Rules::default() },
        Rules { width: 60, ..Rules::default() },
        Rules { height: 0, ..Rules::default() },
        Rules { tick_rate_hz: 0, ..Rules::default() },
        Rules { fire_interval_ms: 0, ..Rules::default() },
        Rules { assist_secs: f32::NAN, ..Rules::default() },
        Rules { assist_secs: 0.0, ..Rules::default() },
        Rules { assist_secs: 1e30, ..Rules::default() },
        Rules { assist_secs: MAX_ASSIST_SECS + 1.0, ..Rules::default() },
        Rules { fall_speed: 0.0, ..Rules::default() },
        Rules { projectile_speed: -20.0, ..Rules::default() },
    ];
    for rules in cases {
        assert!(
            matches!(rules.validate(), Err(ConfigError::Invalid { .. })),
            "accepted {rules:?}"
        );
    }
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.ron");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "(rules: (spawn_chance: 0.5, fall_speed: 3.0), sound: false)").unwrap();

    let (config, warning) = GameConfig::load(Some(path.as_path())).unwrap();
    assert!(warning.is_none());
    assert_eq!(config.rules.spawn_chance, 0.5);
    assert_eq!(config.rules.fall_speed, 3.0);
    assert_eq!(config.rules.width, 800);
    assert!(!config.sound);
}

#[test]
fn missing_named_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.ron");
    assert!(matches!(GameConfig::load(Some(path.as_path())), Err(ConfigError::Io { .. })));
}

#[test]
fn unparsable_named_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ron");
    std::fs::write(&path, "(rules: [").unwrap();
    assert!(matches!(GameConfig::from_file(&path), Err(ConfigError::Parse { .. })));
}

#[test]
fn invalid_rules_in_file_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.ron");
    std::fs::write(&path, "(rules: (bonus_chance: 2.0))").unwrap();
    let err = GameConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("bonus_chance"));
}

#[test]
fn oversized_assist_window_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.ron");
    std::fs::write(&path, "(rules: (assist_secs: 1e30, spawn_chance: 0.0))").unwrap();
    let err = GameConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("assist_secs"));

    let hour = Rules { assist_secs: MAX_ASSIST_SECS, ..Rules::default() };
    assert!(hour.validate().is_ok());
    assert_eq!(hour.assist_duration().as_secs(), 3600);
}

// ── Implicit config in the working directory ─────────────────────────────────

#[test]
fn missing_implicit_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (config, warning) = GameConfig::load_in(dir.path(), None).unwrap();
    assert_eq!(config.rules, Rules::default());
    assert!(config.sound);
    assert!(warning.is_none());
}

#[test]
fn unparsable_implicit_file_gives_defaults_and_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "(rules: [").unwrap();
    let (config, warning) = GameConfig::load_in(dir.path(), None).unwrap();
    assert_eq!(config.rules, Rules::default());
    let warning = warning.expect("broken file should be reported");
    assert!(warning.contains(DEFAULT_CONFIG_FILE));
}

#[test]
fn valid_implicit_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(DEFAULT_CONFIG_FILE),
        "(rules: (fall_speed: 4.0), sound: false)",
    )
    .unwrap();
    let (config, warning) = GameConfig::load_in(dir.path(), None).unwrap();
    assert_eq!(config.rules.fall_speed, 4.0);
    assert!(!config.sound);
    assert!(warning.is_none());
}

#[test]
fn invalid_rules_in_implicit_file_are_still_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "(rules: (spawn_chance: 3.0))").unwrap();
    assert!(matches!(
        GameConfig::load_in(dir.path(), None),
        Err(ConfigError::Invalid { field: "spawn_chance", .. })
    ));
}
