//! Server configuration from the environment

use pitwall_sim::{SimConfig, SimError};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 9100;
/// 10 ticks per second
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid simulation settings: {0}")]
    Sim(#[from] SimError),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub tick_interval: Duration,
    pub sim: SimConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            tick_interval: DEFAULT_TICK_INTERVAL,
            sim: SimConfig::default(),
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                var,
                value,
                expected,
            }),
    }
}

impl ServerConfig {
    /// Read `PITWALL_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, falling back to defaults for unset keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(port) = parse_var(&lookup, "PITWALL_PORT", "a port number")? {
            config.port = port;
        }
        if let Some(millis) = parse_var::<u64>(&lookup, "PITWALL_TICK_MS", "a positive integer")? {
            if millis == 0 {
                return Err(ConfigError::Invalid {
                    var: "PITWALL_TICK_MS",
                    value: millis.to_string(),
                    expected: "a positive integer",
                });
            }
            config.tick_interval = Duration::from_millis(millis);
        }
        if let Some(seed) = parse_var(&lookup, "PITWALL_SEED", "an unsigned integer")? {
            config.sim.seed = Some(seed);
        }
        if let Some(laps) = parse_var(&lookup, "PITWALL_TOTAL_LAPS", "an unsigned integer")? {
            config.sim.total_laps = laps;
        }

        config.sim.validate()?;
        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
