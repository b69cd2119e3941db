//! Process-wide suite configuration.
//!
//! Settings are read from `SPECTREE_*` environment variables. Tests and
//! embedding tools may install an in-process override with
//! [`set_global_override`], which takes precedence over the environment until
//! [`clear_global_override`] is called.

use std::env;
use std::sync::{PoisonError, RwLock};

use log::warn;

use crate::error::ConfigError;

/// Environment variable naming a `host:port` remote reporting server.
pub const STREAM_HOST_ENV: &str = "SPECTREE_STREAM_HOST";
/// Environment variable disabling colourised output.
pub const NO_COLOR_ENV: &str = "SPECTREE_NO_COLOR";
/// Environment variable selecting succinct reporter output.
pub const SUCCINCT_ENV: &str = "SPECTREE_SUCCINCT";
/// Environment variable holding the total attempts allowed per failing example.
pub const FLAKE_ATTEMPTS_ENV: &str = "SPECTREE_FLAKE_ATTEMPTS";
/// Environment variable making pending examples fail the suite.
pub const FAIL_ON_PENDING_ENV: &str = "SPECTREE_FAIL_ON_PENDING";

const BOOL_EXPECTATION: &str = "one of 1/true/yes/on or 0/false/no/off";
const ATTEMPTS_EXPECTATION: &str = "a positive integer";

static GLOBAL_OVERRIDE: RwLock<Option<SuiteConfig>> = RwLock::new(None);

/// Settings consulted once at the start of every suite run.
///
/// # Examples
///
/// ```
/// use spectree::SuiteConfig;
///
/// let config = SuiteConfig::default()
///     .with_stream_host("127.0.0.1:9000")
///     .with_flake_attempts(3);
/// assert_eq!(config.stream_host(), Some("127.0.0.1:9000"));
/// assert_eq!(config.flake_attempts(), 3);
/// assert!(!config.no_color());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    stream_host: Option<String>,
    no_color: bool,
    succinct: bool,
    flake_attempts: u32,
    fail_on_pending: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            stream_host: None,
            no_color: false,
            succinct: false,
            flake_attempts: 1,
            fail_on_pending: false,
        }
    }
}

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "No" | "off" | "OFF" | "Off" => {
            Some(false)
        }
        _ => None,
    }
}

impl SuiteConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults. An empty stream host counts as
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a value
    /// that cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read_bool = |variable: &'static str, default: bool| match lookup(variable) {
            Some(value) => parse_env_bool(&value).ok_or(ConfigError::InvalidValue {
                variable,
                value,
                expected: BOOL_EXPECTATION,
            }),
            None => Ok(default),
        };

        let stream_host = lookup(STREAM_HOST_ENV)
            .map(|host| host.trim().to_owned())
            .filter(|host| !host.is_empty());
        let flake_attempts = match lookup(FLAKE_ATTEMPTS_ENV) {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(attempts) if attempts > 0 => attempts,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        variable: FLAKE_ATTEMPTS_ENV,
                        value,
                        expected: ATTEMPTS_EXPECTATION,
                    });
                }
            },
            None => defaults.flake_attempts,
        };

        Ok(Self {
            stream_host,
            no_color: read_bool(NO_COLOR_ENV, defaults.no_color)?,
            succinct: read_bool(SUCCINCT_ENV, defaults.succinct)?,
            flake_attempts,
            fail_on_pending: read_bool(FAIL_ON_PENDING_ENV, defaults.fail_on_pending)?,
        })
    }

    /// Remote reporting server, when one is configured.
    #[must_use]
    pub fn stream_host(&self) -> Option<&str> {
        self.stream_host.as_deref()
    }

    /// Whether colourised output is disabled.
    #[must_use]
    pub const fn no_color(&self) -> bool {
        self.no_color
    }

    /// Whether reporters should keep output to a minimum.
    #[must_use]
    pub const fn succinct(&self) -> bool {
        self.succinct
    }

    /// Total attempts allowed for a failing example. Always at least one.
    #[must_use]
    pub const fn flake_attempts(&self) -> u32 {
        self.flake_attempts
    }

    /// Whether pending examples fail the suite.
    #[must_use]
    pub const fn fail_on_pending(&self) -> bool {
        self.fail_on_pending
    }

    /// Set the remote reporting server. An empty host clears it.
    #[must_use]
    pub fn with_stream_host(mut self, host: impl Into<String>) -> Self {
        let host = host.into();
        self.stream_host = (!host.is_empty()).then_some(host);
        self
    }

    /// Enable or disable colourised output.
    #[must_use]
    pub const fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Enable or disable succinct output.
    #[must_use]
    pub const fn with_succinct(mut self, succinct: bool) -> Self {
        self.succinct = succinct;
        self
    }

    /// Set the total attempts per failing example; zero is raised to one.
    #[must_use]
    pub fn with_flake_attempts(mut self, attempts: u32) -> Self {
        self.flake_attempts = attempts.max(1);
        self
    }

    /// Make pending examples fail the suite.
    #[must_use]
    pub const fn with_fail_on_pending(mut self, fail_on_pending: bool) -> Self {
        self.fail_on_pending = fail_on_pending;
        self
    }
}

/// Resolve the configuration for a suite run.
///
/// Returns the in-process override when one is installed, otherwise the
/// environment. Invalid environment values are logged and replaced by the
/// defaults so the suite still runs.
#[must_use]
pub fn global() -> SuiteConfig {
    let installed = GLOBAL_OVERRIDE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    installed.unwrap_or_else(|| {
        SuiteConfig::from_env().unwrap_or_else(|error| {
            warn!("ignoring suite configuration from environment: {error}");
            SuiteConfig::default()
        })
    })
}

/// Install a process-wide configuration override.
///
/// Tests using the override must be marked `#[serial]` to avoid races.
pub fn set_global_override(config: SuiteConfig) {
    *GLOBAL_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(config);
}

/// Remove the process-wide override, re-exposing the environment.
pub fn clear_global_override() {
    *GLOBAL_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
}
