//! Configuration module

use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

use funnel_core::constants::{
    DEFAULT_MAX_USERS, DEFAULT_MIN_USERS, DEFAULT_MODEL_PATH, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED,
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// ONNX model path; its sidecar sits next to it
    pub model_path: String,

    /// Fail startup instead of falling back when the model is missing
    pub model_required: bool,

    /// Dataset seed applied to every simulation
    pub simulation_seed: u64,

    /// Simulated users per request, inclusive bounds
    pub min_users: usize,
    pub max_users: usize,

    /// Records returned in `sample_data`
    pub sample_size: usize,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            model_path: DEFAULT_MODEL_PATH.to_string(),
            model_required: false,
            simulation_seed: DEFAULT_SEED,
            min_users: DEFAULT_MIN_USERS,
            max_users: DEFAULT_MAX_USERS,
            sample_size: DEFAULT_SAMPLE_SIZE,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup; unset or invalid values
    /// keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mut config = Self {
            host: lookup("HOST").unwrap_or(defaults.host),

            port: parse_or(&lookup, "PORT", defaults.port),

            model_path: lookup("MODEL_PATH").unwrap_or(defaults.model_path),

            model_required: lookup("MODEL_REQUIRED")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.model_required),

            simulation_seed: parse_or(&lookup, "SIMULATION_SEED", defaults.simulation_seed),

            min_users: parse_or(&lookup, "MIN_USERS", defaults.min_users),

            max_users: parse_or(&lookup, "MAX_USERS", defaults.max_users),

            sample_size: parse_or(&lookup, "SAMPLE_SIZE", defaults.sample_size),

            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
        };

        if config.min_users > config.max_users {
            std::mem::swap(&mut config.min_users, &mut config.max_users);
        }

        config
    }

    /// Inclusive range of simulated users per request
    pub fn user_range(&self) -> RangeInclusive<usize> {
        self.min_users..=self.max_users
    }

    /// `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
