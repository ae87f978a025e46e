use fourline_ai::Tier;
use fourline_arena::config::{self, CONFIG_PATH_VAR};
use fourline_arena::{ConfigError, ValueSource};
use serial_test::serial;
use std::io::Write;
use std::time::Duration;

const VARS: &[&str] = &[
    CONFIG_PATH_VAR,
    "FOURLINE_ROWS",
    "FOURLINE_COLS",
    "FOURLINE_TURN_TIMEOUT",
    "FOURLINE_THINK_MS",
    "FOURLINE_IDLE_TTL",
    "FOURLINE_TIER",
];

/// Clears the arena variables, applies `pairs`, restores on drop.
struct EnvGuard {
    restores: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn apply(pairs: &[(&'static str, &str)]) -> Self {
        let restores = VARS
            .iter()
            .map(|&key| (key, std::env::var(key).ok()))
            .collect();
        for key in VARS {
            std::env::remove_var(key);
        }
        for (key, value) in pairs {
            std::env::set_var(key, value);
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in &self.restores {
            match previous {
                Some(val) => std::env::set_var(key, val),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{contents}").expect("write config");
    file
}

#[test]
#[serial]
fn file_values_override_defaults() {
    let file = config_file(
        "default_rows = 7\nadversary_think_ms = 200\nidle_ttl_minutes = 5\ndefault_tier = \"random\"\n",
    );
    let path = file.path().to_string_lossy().into_owned();
    let _env = EnvGuard::apply(&[(CONFIG_PATH_VAR, path.as_str())]);

    let resolved = config::load_with_sources().expect("load");
    assert_eq!(resolved.settings.default_rows, 7);
    assert_eq!(resolved.sources.default_rows, ValueSource::File);
    assert_eq!(resolved.settings.default_cols, 7);
    assert_eq!(resolved.sources.default_cols, ValueSource::Default);
    assert_eq!(resolved.settings.think_delay(), Duration::from_millis(200));
    assert_eq!(resolved.settings.idle_ttl(), Duration::from_secs(300));
    assert_eq!(resolved.settings.default_tier, Tier::Random);
    assert_eq!(resolved.sources.default_tier, ValueSource::File);
}

#[test]
#[serial]
fn env_beats_file() {
    let file = config_file("default_cols = 9\nturn_timeout_secs = 20\n");
    let path = file.path().to_string_lossy().into_owned();
    let _env = EnvGuard::apply(&[
        (CONFIG_PATH_VAR, path.as_str()),
        ("FOURLINE_COLS", "11"),
        ("FOURLINE_TURN_TIMEOUT", "0"),
    ]);

    let resolved = config::load_with_sources().expect("load");
    assert_eq!(resolved.settings.default_cols, 11);
    assert_eq!(resolved.sources.default_cols, ValueSource::Env);
    assert_eq!(resolved.settings.turn_timeout(), None);
    assert_eq!(resolved.sources.turn_timeout_secs, ValueSource::Env);
}

#[test]
#[serial]
fn malformed_file_is_a_parse_error() {
    let file = config_file("default_rows = \"six\"\n");
    let path = file.path().to_string_lossy().into_owned();
    let _env = EnvGuard::apply(&[(CONFIG_PATH_VAR, path.as_str())]);

    assert!(matches!(
        config::load_with_sources(),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
#[serial]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let path = path.to_string_lossy().into_owned();
    let _env = EnvGuard::apply(&[(CONFIG_PATH_VAR, path.as_str())]);

    assert!(matches!(config::load(), Err(ConfigError::Io(_))));
}

#[test]
#[serial]
fn file_values_are_validated() {
    let file = config_file("default_rows = 3\n");
    let path = file.path().to_string_lossy().into_owned();
    let _env = EnvGuard::apply(&[(CONFIG_PATH_VAR, path.as_str())]);

    assert!(matches!(config::load(), Err(ConfigError::Invalid(_))));
}
