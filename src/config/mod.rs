// src/config/mod.rs
pub mod catalog;

use std::time::Duration;

pub const ENV_USER_AGENT: &str = "SCOUT_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "SCOUT_TIMEOUT_SECS";
pub const ENV_PACING_MS: &str = "SCOUT_PACING_MS";
pub const ENV_BASE_URL: &str = "SCOUT_BASE_URL";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; TeedRising/1.0)";
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
// Anonymous listing access tolerates roughly one request per second.
const DEFAULT_PACING_MS: u64 = 500;

/// Knobs that are not exposed as CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoutSettings {
    pub user_agent: String,
    pub base_url: String,
    pub timeout: Duration,
    pub pacing: Duration,
}

impl Default for ScoutSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
        }
    }
}

impl ScoutSettings {
    /// Defaults overridden by `SCOUT_*` env vars. Unparsable numbers keep the
    /// default and log a warning.
    pub fn from_env() -> Self {
        let mut s = Self::default();

        if let Some(ua) = env_nonempty(ENV_USER_AGENT) {
            s.user_agent = ua;
        }
        if let Some(url) = env_nonempty(ENV_BASE_URL) {
            s.base_url = url;
        }
        if let Some(secs) = env_u64(ENV_TIMEOUT_SECS) {
            if secs == 0 {
                tracing::warn!(var = ENV_TIMEOUT_SECS, "zero timeout ignored");
            } else {
                s.timeout = Duration::from_secs(secs);
            }
        }
        if let Some(ms) = env_u64(ENV_PACING_MS) {
            s.pacing = Duration::from_millis(ms);
        }
        s
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    let raw = env_nonempty(key)?;
    match raw.parse::<u64>() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(var = key, value = %raw, error = %e, "invalid number; using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn clear() {
        for k in [ENV_USER_AGENT, ENV_TIMEOUT_SECS, ENV_PACING_MS, ENV_BASE_URL] {
            env::remove_var(k);
        }
    }

    #[serial_test::serial]
    #[test]
    fn defaults_without_env() {
        clear();
        let s = ScoutSettings::from_env();
        assert_eq!(s, ScoutSettings::default());
        assert_eq!(s.timeout, Duration::from_secs(10));
        assert_eq!(s.pacing, Duration::from_millis(500));
    }

    #[serial_test::serial]
    #[test]
    fn env_overrides_and_bad_values() {
        clear();
        env::set_var(ENV_USER_AGENT, " scout-test/0.1 ");
        env::set_var(ENV_PACING_MS, "0");
        env::set_var(ENV_TIMEOUT_SECS, "soon");
        env::set_var(ENV_BASE_URL, "http://127.0.0.1:9");

        let s = ScoutSettings::from_env();
        assert_eq!(s.user_agent, "scout-test/0.1");
        assert_eq!(s.pacing, Duration::ZERO);
        assert_eq!(s.timeout, Duration::from_secs(10));
        assert_eq!(s.base_url, "http://127.0.0.1:9");

        env::set_var(ENV_TIMEOUT_SECS, "0");
        assert_eq!(ScoutSettings::from_env().timeout, Duration::from_secs(10));
        clear();
    }
}
