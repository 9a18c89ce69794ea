use std::path::PathBuf;

use dialquest::{
    replay::{self, ReplayError},
    ConfigError, DialConfig, GameSession,
};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn fixture(name: &str) -> PathBuf {
    repo_root().join("tests").join("fixtures").join(name)
}

fn default_config() -> DialConfig {
    DialConfig::from_path(&repo_root().join("config/dial.toml"))
        .expect("default config should load")
}

fn replay_fixture(name: &str) -> Vec<replay::ReplayLine> {
    let config = default_config();
    let records =
        replay::parse_trace(&fixture(&format!("{name}.csv"))).expect("trace should parse");
    let mut session = GameSession::new(config.session_config(), config.assets());
    replay::run(&mut session, &records)
}

#[test]
fn shipped_config_matches_builtin_defaults() {
    assert_eq!(default_config(), DialConfig::default());
}

#[test]
fn recorded_traces_reproduce_expected_labels() {
    for name in ["full_game", "long_press", "slide_and_miss"] {
        let lines = replay_fixture(name);
        let expected = replay::parse_expected_labels(&fixture(&format!("{name}.expected")))
            .expect("expected labels should parse");
        if let Err(err) = replay::compare_labels(&expected, &lines) {
            panic!("{name}: {err}");
        }
    }
}

#[test]
fn full_game_ends_with_congratulations() {
    let lines = replay_fixture("full_game");
    let last_text = lines
        .iter()
        .rev()
        .find(|line| line.label == "text")
        .expect("text command");
    assert_eq!(last_text.detail, "smaller:Congratulations!");

    let images: Vec<&str> = lines
        .iter()
        .filter(|line| line.label == "image")
        .map(|line| line.detail.as_str())
        .collect();
    assert_eq!(images.len(), 4);
    assert!(images[3].ends_with("lv4.png"), "got {}", images[3]);
}

#[test]
fn long_press_fires_at_virtual_deadline() {
    let lines = replay_fixture("long_press");
    assert_eq!(lines[2].ms, 700);
    assert_eq!(lines[2].detail, "normal:+");
    assert_eq!(lines.last().map(|l| l.detail.as_str()), Some("normal:level "));
}

#[test]
fn invalid_configs_are_rejected() {
    let cases = [
        ("invalid/no_levels.toml", "levels must contain at least one level"),
        ("invalid/bad_answer.toml", "levels[1].answer must be a digit 0-9"),
        ("invalid/zero_long_press.toml", "long_press_ms must be > 0"),
        (
            "invalid/negative_radius.toml",
            "dial.min_radius must be a finite value >= 0",
        ),
    ];

    for (fixture_name, expected_msg) in cases {
        let err = DialConfig::from_path(&fixture(fixture_name))
            .expect_err("fixture should fail validation");
        match err {
            ConfigError::Validation(msg) => assert!(
                msg.contains(expected_msg),
                "expected validation message containing `{expected_msg}`, got `{msg}`"
            ),
            other => panic!("expected validation error, got {other}"),
        }
    }
}

#[test]
fn schema_mismatch_is_parse_error() {
    let err = DialConfig::from_path(&fixture("invalid/unknown_field.toml"))
        .expect_err("fixture should fail parsing");
    match err {
        ConfigError::Parse(msg) => assert!(msg.contains("radius"), "got `{msg}`"),
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn missing_trace_reports_path() {
    let err = replay::parse_trace(&fixture("absent.csv")).expect_err("missing trace");
    assert!(matches!(err, ReplayError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
