//! Environment detection
//!
//! Decides whether the current process counts as `development` or
//! `production`. Detection is a query, evaluated on every call: the simulated
//! environment preference can change while the process runs, so nothing here
//! caches a result.

use crate::constants::{BUILD_MODE_VAR, DEPLOY_ENV_VAR};
use crate::prefs::Preferences;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Execution environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Development,
    Production,
}

impl Env {
    pub fn as_str(&self) -> &'static str {
        match self {
            Env::Development => "development",
            Env::Production => "production",
        }
    }

    /// The other environment
    pub fn toggled(&self) -> Env {
        match self {
            Env::Development => Env::Production,
            Env::Production => Env::Development,
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Env {
    type Err = ();

    /// Exact, case-sensitive match on `development` / `production`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "development" => Ok(Env::Development),
            "production" => Ok(Env::Production),
            _ => Err(()),
        }
    }
}

/// Signals the oracle consults, in priority order
pub trait HostContext {
    /// Manually chosen environment (e.g. a persisted demo toggle)
    fn env_override(&self) -> Option<String>;
    /// Explicit deploy-time environment variable
    fn deploy_env(&self) -> Option<String>;
    /// Generic build mode
    fn build_mode(&self) -> Option<String>;
    /// Host name the application is served from; `None` when headless
    fn hostname(&self) -> Option<String>;
}

/// Resolve the current environment. First match wins:
/// override, deploy variable, build mode, host name heuristic, headless default.
pub fn detect_env(host: &dyn HostContext) -> Env {
    let signals = [host.env_override(), host.deploy_env(), host.build_mode()];
    if let Some(env) = signals
        .iter()
        .flatten()
        .find_map(|value| value.parse::<Env>().ok())
    {
        return env;
    }

    match host.hostname() {
        Some(name) => classify_hostname(&name),
        // No host to judge by: never hide diagnostics
        None => Env::Development,
    }
}

/// Convenience: `detect_env(host) == Production`. Uncached.
pub fn is_prod(host: &dyn HostContext) -> bool {
    detect_env(host) == Env::Production
}

/// Host name heuristic
pub fn classify_hostname(host: &str) -> Env {
    let local = host == "localhost"
        || host == "127.0.0.1"
        || host.starts_with("192.168.")
        || host.starts_with("10.")
        || host.ends_with(".local");

    const DEV_MARKERS: [&str; 8] = [
        "localhost",
        "dev.",
        "-dev.",
        ".dev-",
        "preview",
        "staging",
        "-test.",
        ".test",
    ];

    if local || DEV_MARKERS.iter().any(|marker| host.contains(marker)) {
        Env::Development
    } else {
        Env::Production
    }
}

// =============================================================================
// Host implementations
// =============================================================================

/// Host context of the running process.
///
/// The override comes from the shared preferences, the deploy variable and
/// build mode from the process environment (read on every query), and the
/// host name from config.
#[derive(Debug, Clone)]
pub struct ProcessHost {
    prefs: Preferences,
    hostname: Option<String>,
}

impl ProcessHost {
    pub fn new(prefs: Preferences, hostname: Option<String>) -> Self {
        Self { prefs, hostname }
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }
}

impl HostContext for ProcessHost {
    fn env_override(&self) -> Option<String> {
        self.prefs.simulated_env_raw()
    }

    fn deploy_env(&self) -> Option<String> {
        std::env::var(DEPLOY_ENV_VAR).ok()
    }

    fn build_mode(&self) -> Option<String> {
        std::env::var(BUILD_MODE_VAR).ok()
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }
}

/// Fixed host context
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    pub env_override: Option<String>,
    pub deploy_env: Option<String>,
    pub build_mode: Option<String>,
    pub hostname: Option<String>,
}

impl StaticHost {
    /// Headless host with no signals (resolves to development)
    pub fn headless() -> Self {
        Self::default()
    }

    /// Host served from the given name
    pub fn with_hostname(hostname: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            ..Self::default()
        }
    }

    /// Host with a fixed environment
    pub fn fixed(env: Env) -> Self {
        Self {
            env_override: Some(env.as_str().to_string()),
            ..Self::default()
        }
    }
}

impl HostContext for StaticHost {
    fn env_override(&self) -> Option<String> {
        self.env_override.clone()
    }

    fn deploy_env(&self) -> Option<String> {
        self.deploy_env.clone()
    }

    fn build_mode(&self) -> Option<String> {
        self.build_mode.clone()
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }
}
