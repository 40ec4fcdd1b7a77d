//! Bot configuration
//!
//! [`BotConfig`] is read from the environment (a `.env` file is loaded by the
//! binary first). [`SessionTimings`] and the retry policy have defaults that
//! tests shorten.

use super::error::{BotError, BotResult};
use crate::api::RetryPolicy;
use chess_engine::constants::DEFAULT_SEARCH_DEPTH;
use std::time::Duration;

pub const TOKEN_VAR: &str = "LICHESS_TOKEN";
pub const HOST_VAR: &str = "LICHESS_HOST";
pub const EXPLORER_HOST_VAR: &str = "LICHESS_EXPLORER_HOST";
pub const DEPTH_VAR: &str = "XFCHESS_SEARCH_DEPTH";

pub const DEFAULT_HOST: &str = "https://lichess.org";
pub const DEFAULT_EXPLORER_HOST: &str = "https://explorer.lichess.ovh";

/// Deepest search accepted from configuration
pub const MAX_SEARCH_DEPTH: u32 = 8;

/// Wait intervals for the session workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimings {
    /// Longest a worker blocks before re-checking the active flag. Default: 3s.
    pub wake_interval: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            wake_interval: Duration::from_secs(3),
        }
    }
}

impl SessionTimings {
    pub fn with_wake_interval(mut self, interval: Duration) -> Self {
        self.wake_interval = interval;
        self
    }
}

/// Everything a session needs besides the service client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub token: String,
    pub host: String,
    pub explorer_host: String,
    pub search_depth: u32,
    pub retry: RetryPolicy,
    pub timings: SessionTimings,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            host: DEFAULT_HOST.to_string(),
            explorer_host: DEFAULT_EXPLORER_HOST.to_string(),
            search_depth: DEFAULT_SEARCH_DEPTH,
            retry: RetryPolicy::default(),
            timings: SessionTimings::default(),
        }
    }
}

impl BotConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> BotResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(BotError::MissingConfig { name: TOKEN_VAR })?;

        let mut config = Self {
            token,
            ..Self::default()
        };

        if let Some(host) = lookup(HOST_VAR) {
            config.host = host;
        }
        if let Some(host) = lookup(EXPLORER_HOST_VAR) {
            config.explorer_host = host;
        }
        if let Some(raw) = lookup(DEPTH_VAR) {
            config.search_depth = parse_depth(&raw)?;
        }

        Ok(config)
    }

    pub fn with_search_depth(mut self, depth: u32) -> BotResult<Self> {
        self.search_depth = validate_depth(depth, &depth.to_string())?;
        Ok(self)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timings(mut self, timings: SessionTimings) -> Self {
        self.timings = timings;
        self
    }
}

fn parse_depth(raw: &str) -> BotResult<u32> {
    let depth = raw.trim().parse::<u32>().map_err(|e| BotError::InvalidConfig {
        name: DEPTH_VAR,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    validate_depth(depth, raw)
}

fn validate_depth(depth: u32, raw: &str) -> BotResult<u32> {
    if (1..=MAX_SEARCH_DEPTH).contains(&depth) {
        Ok(depth)
    } else {
        Err(BotError::InvalidConfig {
            name: DEPTH_VAR,
            value: raw.to_string(),
            reason: format!("expected 1..={MAX_SEARCH_DEPTH}"),
        })
    }
}
