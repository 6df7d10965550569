//! Runtime configuration read from the environment.

use std::env;

pub const BIND_ENV: &str = "IMPACTOR_BIND";
pub const WORKERS_ENV: &str = "IMPACTOR_WORKERS";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    /// Sweep worker threads; 0 means the rayon default.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            workers: 0,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests don't touch process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = lookup(BIND_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.bind_addr);

        let workers = match lookup(WORKERS_ENV) {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    "invalid {WORKERS_ENV}, defaulting to {}",
                    defaults.workers
                );
                defaults.workers
            }),
            None => defaults.workers,
        };

        Self { bind_addr, workers }
    }
}
