use client::ClientConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracking service transport settings.
    pub tracking: ClientConfig,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Seconds between refresh runs.
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    /// When set, only tags whose asset description contains this token are
    /// loaded into the registry (e.g. "JL" to keep one client's fleet).
    #[serde(default)]
    pub asset_description_contains: Option<String>,
}

// Default value functions
fn default_poll_interval() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with BT__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("BT").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Built entirely from embedded defaults and overrides, without relying
    /// on config files (which may not be accessible during tests).
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [tracking]
            base_url = "http://tracker.local"
            timeout_secs = 30
            event_fetch_count = 20
            triangulation_fetch_count = 10

            [poll]
            interval_secs = 30

            [logging]
            level = "info"
            format = "pretty"

            [registry]
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        let config = Config::load_for_test(&[]).unwrap();
        assert_eq!(config.poll.interval_secs, 30);
        assert_eq!(config.tracking.event_fetch_count, 20);
        assert_eq!(config.logging.level, "info");
        assert!(config.registry.asset_description_contains.is_none());
    }

    #[test]
    fn test_overrides_apply() {
        let config = Config::load_for_test(&[
            ("poll.interval_secs", "5"),
            ("registry.asset_description_contains", "JL"),
        ])
        .unwrap();
        assert_eq!(config.poll.interval_secs, 5);
        assert_eq!(
            config.registry.asset_description_contains.as_deref(),
            Some("JL")
        );
    }
}
