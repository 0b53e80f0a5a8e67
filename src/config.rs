use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TICKS: u64 = 10;
const DEFAULT_TICK_MS: u64 = 600;
const DEFAULT_WANDER_MS: u64 = 1000;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("usage: mobstate <data-root> [ticks]")]
    Usage,
    #[error("invalid {name} '{value}': expected a whole number")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub root: PathBuf,
    pub ticks: u64,
    pub tick_length: Duration,
    pub wander_interval: Duration,
    pub seed: Option<u64>,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        Self::from_args_with_env(args, |name| std::env::var(name).ok())
    }

    fn from_args_with_env(
        args: &[String],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if args.len() < 2 {
            return Err(ConfigError::Usage);
        }

        let root = Path::new(&args[1]).to_path_buf();
        let ticks = match args.get(2) {
            Some(value) => parse_u64("ticks", value)?,
            None => DEFAULT_TICKS,
        };
        let env_value = |name: &str| {
            env(name).and_then(|value| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };
        let tick_ms = match env_value("MOBSTATE_TICK_MS") {
            Some(value) => parse_u64("MOBSTATE_TICK_MS", &value)?,
            None => DEFAULT_TICK_MS,
        };
        let wander_ms = match env_value("MOBSTATE_WANDER_MS") {
            Some(value) => parse_u64("MOBSTATE_WANDER_MS", &value)?,
            None => DEFAULT_WANDER_MS,
        };
        let seed = env_value("MOBSTATE_SEED")
            .map(|value| parse_u64("MOBSTATE_SEED", &value))
            .transpose()?;
        let log_filter =
            env_value("MOBSTATE_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            root,
            ticks,
            tick_length: Duration::from_millis(tick_ms),
            wander_interval: Duration::from_millis(wander_ms),
            seed,
            log_filter,
        })
    }

    pub fn items_dir(&self) -> PathBuf {
        self.root.join("items")
    }

    pub fn definitions_path(&self) -> PathBuf {
        self.root.join("cache").join("definitions.yaml")
    }

    pub fn spawns_path(&self) -> PathBuf {
        self.root.join("npcs.yaml")
    }
}

fn parse_u64(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn env(values: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = values
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn root_is_required() {
        let err = AppConfig::from_args_with_env(&args(&["mobstate"]), env(&[])).expect_err("usage");
        assert_eq!(err, ConfigError::Usage);
    }

    #[test]
    fn defaults_apply_without_env() {
        let config =
            AppConfig::from_args_with_env(&args(&["mobstate", "data"]), env(&[])).expect("config");
        assert_eq!(config.root, PathBuf::from("data"));
        assert_eq!(config.ticks, 10);
        assert_eq!(config.tick_length, Duration::from_millis(600));
        assert_eq!(config.wander_interval, Duration::from_millis(1000));
        assert_eq!(config.seed, None);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.items_dir(), PathBuf::from("data").join("items"));
    }

    #[test]
    fn env_overrides_are_parsed() {
        let config = AppConfig::from_args_with_env(
            &args(&["mobstate", "data", "25"]),
            env(&[
                ("MOBSTATE_TICK_MS", "300"),
                ("MOBSTATE_SEED", " 42 "),
                ("MOBSTATE_WANDER_MS", ""),
                ("MOBSTATE_LOG", "mobstate=debug"),
            ]),
        )
        .expect("config");
        assert_eq!(config.ticks, 25);
        assert_eq!(config.tick_length, Duration::from_millis(300));
        assert_eq!(config.wander_interval, Duration::from_millis(1000));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_filter, "mobstate=debug");
    }

    #[test]
    fn bad_numbers_are_errors() {
        let err = AppConfig::from_args_with_env(
            &args(&["mobstate", "data"]),
            env(&[("MOBSTATE_SEED", "abc")]),
        )
        .expect_err("seed");
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "MOBSTATE_SEED",
                value: "abc".to_string()
            }
        );
        let err = AppConfig::from_args_with_env(&args(&["mobstate", "data", "-1"]), env(&[]))
            .expect_err("ticks");
        assert!(matches!(err, ConfigError::InvalidNumber { name: "ticks", .. }));
    }
}
