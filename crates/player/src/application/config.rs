//! Player configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_INITIAL_CHATS: usize = 10;
pub const DEFAULT_ASSET_ROOT: &str = "assets";
pub const DEFAULT_WIDGET_POLL_INTERVAL_MS: u64 = 60;
pub const DEFAULT_WIDGET_POLL_WINDOW_MS: u64 = 2500;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Player configuration loaded from environment
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Generic chats shown before the intro runs
    pub initial_chats: usize,
    /// Directory that image paths are resolved against
    pub asset_root: PathBuf,
    /// Multiplier applied to every sampled delay (0 disables waiting)
    pub delay_scale: f64,
    /// Embedded widget polling
    pub widget: WidgetConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetConfig {
    pub poll_interval_ms: u64,
    pub poll_window_ms: u64,
}

impl WidgetConfig {
    /// Number of availability checks that fit in the polling window
    pub fn max_polls(&self) -> u64 {
        if self.poll_interval_ms == 0 {
            return 1;
        }
        (self.poll_window_ms / self.poll_interval_ms).max(1)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_WIDGET_POLL_INTERVAL_MS,
            poll_window_ms: DEFAULT_WIDGET_POLL_WINDOW_MS,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_chats: DEFAULT_INITIAL_CHATS,
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            delay_scale: 1.0,
            widget: WidgetConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let delay_scale = parse_or(
            &lookup,
            "MARTISOR_DELAY_SCALE",
            defaults.delay_scale,
            "a non-negative number",
        )?;
        if !delay_scale.is_finite() || delay_scale < 0.0 {
            return Err(ConfigError::Invalid {
                key: "MARTISOR_DELAY_SCALE",
                value: delay_scale.to_string(),
                expected: "a non-negative number",
            });
        }

        Ok(Self {
            initial_chats: parse_or(
                &lookup,
                "MARTISOR_INITIAL_CHATS",
                defaults.initial_chats,
                "a chat count",
            )?,
            asset_root: lookup("MARTISOR_ASSET_ROOT")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_root),
            delay_scale,
            widget: WidgetConfig {
                poll_interval_ms: parse_or(
                    &lookup,
                    "MARTISOR_WIDGET_POLL_INTERVAL_MS",
                    defaults.widget.poll_interval_ms,
                    "milliseconds",
                )?,
                poll_window_ms: parse_or(
                    &lookup,
                    "MARTISOR_WIDGET_POLL_WINDOW_MS",
                    defaults.widget.poll_window_ms,
                    "milliseconds",
                )?,
            },
        })
    }

    /// Apply the delay scale to a sampled delay
    pub fn scale_delay(&self, ms: u64) -> u64 {
        (ms as f64 * self.delay_scale).round() as u64
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(key).map(|s| s.trim().to_string()) {
        None => Ok(default),
        Some(value) if value.is_empty() => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            key,
            value,
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PlayerConfig::from_lookup(lookup_from(&[])).expect("config");
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.initial_chats, 10);
        assert_eq!(config.widget.max_polls(), 41);
    }

    #[test]
    fn test_overrides() {
        let config = PlayerConfig::from_lookup(lookup_from(&[
            ("MARTISOR_INITIAL_CHATS", "4"),
            ("MARTISOR_ASSET_ROOT", " /srv/martisor "),
            ("MARTISOR_DELAY_SCALE", "0.5"),
            ("MARTISOR_WIDGET_POLL_INTERVAL_MS", "100"),
            ("MARTISOR_WIDGET_POLL_WINDOW_MS", "1000"),
        ]))
        .expect("config");

        assert_eq!(config.initial_chats, 4);
        assert_eq!(config.asset_root, PathBuf::from("/srv/martisor"));
        assert_eq!(config.scale_delay(900), 450);
        assert_eq!(config.widget.max_polls(), 10);
    }

    #[test]
    fn test_malformed_values_are_errors() {
        let err = PlayerConfig::from_lookup(lookup_from(&[("MARTISOR_INITIAL_CHATS", "ten")]))
            .expect_err("should fail");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "MARTISOR_INITIAL_CHATS",
                ..
            }
        ));

        let err = PlayerConfig::from_lookup(lookup_from(&[("MARTISOR_DELAY_SCALE", "-1")]))
            .expect_err("should fail");
        assert!(err.to_string().contains("MARTISOR_DELAY_SCALE"));
    }

    #[test]
    fn test_zero_interval_polls_once() {
        let widget = WidgetConfig {
            poll_interval_ms: 0,
            poll_window_ms: 2500,
        };
        assert_eq!(widget.max_polls(), 1);
    }
}
