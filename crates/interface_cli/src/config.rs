//! Runner configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Runner configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Scenario file to run
    pub scenario_path: Option<PathBuf>,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            scenario_path: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl RunnerConfig {
    /// Loads configuration from `SETTLE_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::with_prefix("SETTLE"))
    }

    /// Loads configuration from an environment source, applying defaults
    pub fn from_environment(env: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Replaces the scenario path, e.g. from a command line argument
    pub fn with_scenario_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenario_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let mut map = config::Map::new();
        for (key, value) in vars {
            map.insert(key.to_string(), value.to_string());
        }
        config::Environment::with_prefix("SETTLE").source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::from_environment(env(&[])).unwrap();
        assert!(config.scenario_path.is_none());
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn test_prefixed_variables() {
        let config = RunnerConfig::from_environment(env(&[
            ("SETTLE_SCENARIO_PATH", "trip.json"),
            ("SETTLE_LOG_LEVEL", "debug"),
            ("SETTLE_LOG_JSON", "true"),
        ]))
        .unwrap();
        assert_eq!(config.scenario_path, Some(PathBuf::from("trip.json")));
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
    }

    #[test]
    fn test_argument_overrides_path() {
        let config = RunnerConfig::default().with_scenario_path("other.json");
        assert_eq!(config.scenario_path, Some(PathBuf::from("other.json")));
    }
}
