use fourline_ai::Tier;
use fourline_engine::board::{DEFAULT_COLS, DEFAULT_ROWS, MAX_DIMENSION, MIN_DIMENSION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "FOURLINE_CONFIG";

/// Arena-wide defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArenaSettings {
    pub default_rows: usize,
    pub default_cols: usize,
    /// Seconds a human has per turn; 0 disables the timer.
    pub turn_timeout_secs: u64,
    /// Pause before the adversary moves, in milliseconds.
    pub adversary_think_ms: u64,
    /// Sessions idle for longer than this are reaped.
    pub idle_ttl_minutes: u64,
    pub default_tier: Tier,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            default_rows: DEFAULT_ROWS,
            default_cols: DEFAULT_COLS,
            turn_timeout_secs: 0,
            adversary_think_ms: 750,
            idle_ttl_minutes: 30,
            default_tier: Tier::Medium,
        }
    }
}

impl ArenaSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("default_rows", self.default_rows),
            ("default_cols", self.default_cols),
        ] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {value}"
                )));
            }
        }

        if self.idle_ttl_minutes == 0 {
            return Err(ConfigError::Invalid(
                "idle_ttl_minutes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn turn_timeout(&self) -> Option<Duration> {
        (self.turn_timeout_secs > 0).then(|| Duration::from_secs(self.turn_timeout_secs))
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.adversary_think_ms)
    }

    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_minutes.saturating_mul(60))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsSources {
    pub default_rows: ValueSource,
    pub default_cols: ValueSource,
    pub turn_timeout_secs: ValueSource,
    pub adversary_think_ms: ValueSource,
    pub idle_ttl_minutes: ValueSource,
    pub default_tier: ValueSource,
}

impl Default for SettingsSources {
    fn default() -> Self {
        Self {
            default_rows: ValueSource::Default,
            default_cols: ValueSource::Default,
            turn_timeout_secs: ValueSource::Default,
            adversary_think_ms: ValueSource::Default,
            idle_ttl_minutes: ValueSource::Default,
            default_tier: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub settings: ArenaSettings,
    pub sources: SettingsSources,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    default_rows: Option<usize>,
    default_cols: Option<usize>,
    turn_timeout_secs: Option<u64>,
    adversary_think_ms: Option<u64>,
    idle_ttl_minutes: Option<u64>,
    default_tier: Option<Tier>,
}

pub fn load() -> Result<ArenaSettings, ConfigError> {
    load_with_sources().map(|resolved| resolved.settings)
}

/// Defaults, then the TOML file named by `FOURLINE_CONFIG`, then the
/// `FOURLINE_*` variables. Later layers win.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut settings = ArenaSettings::default();
    let mut sources = SettingsSources::default();

    if let Some(path) = non_empty_var(CONFIG_PATH_VAR) {
        let raw = fs::read_to_string(&path)?;
        let file: FileSettings = toml::from_str(&raw)?;
        tracing::debug!(path = %path, "loaded arena config file");

        if let Some(v) = file.default_rows {
            settings.default_rows = v;
            sources.default_rows = ValueSource::File;
        }
        if let Some(v) = file.default_cols {
            settings.default_cols = v;
            sources.default_cols = ValueSource::File;
        }
        if let Some(v) = file.turn_timeout_secs {
            settings.turn_timeout_secs = v;
            sources.turn_timeout_secs = ValueSource::File;
        }
        if let Some(v) = file.adversary_think_ms {
            settings.adversary_think_ms = v;
            sources.adversary_think_ms = ValueSource::File;
        }
        if let Some(v) = file.idle_ttl_minutes {
            settings.idle_ttl_minutes = v;
            sources.idle_ttl_minutes = ValueSource::File;
        }
        if let Some(v) = file.default_tier {
            settings.default_tier = v;
            sources.default_tier = ValueSource::File;
        }
    }

    if let Some(v) = env_parsed("FOURLINE_ROWS")? {
        settings.default_rows = v;
        sources.default_rows = ValueSource::Env;
    }
    if let Some(v) = env_parsed("FOURLINE_COLS")? {
        settings.default_cols = v;
        sources.default_cols = ValueSource::Env;
    }
    if let Some(v) = env_parsed("FOURLINE_TURN_TIMEOUT")? {
        settings.turn_timeout_secs = v;
        sources.turn_timeout_secs = ValueSource::Env;
    }
    if let Some(v) = env_parsed("FOURLINE_THINK_MS")? {
        settings.adversary_think_ms = v;
        sources.adversary_think_ms = ValueSource::Env;
    }
    if let Some(v) = env_parsed("FOURLINE_IDLE_TTL")? {
        settings.idle_ttl_minutes = v;
        sources.idle_ttl_minutes = ValueSource::Env;
    }
    if let Some(v) = env_parsed("FOURLINE_TIER")? {
        settings.default_tier = v;
        sources.default_tier = ValueSource::Env;
    }

    settings.validate()?;
    Ok(ConfigResolved { settings, sources })
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name}: cannot parse {raw:?}"))),
        None => Ok(None),
    }
}
