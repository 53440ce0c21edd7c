use crate::Result;

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    InvalidValue(&'static str, String),
}

/// Longest default statement period accepted, about a century
const MAX_STATEMENT_WINDOW_DAYS: i64 = 36_600;

/// Tunables of the ledger engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// How long an operation waits for exclusive access to one account
    pub lock_timeout: Duration,

    /// Attempts made when an operation fails with a lock conflict
    pub max_attempts: u32,

    /// Country and check digits every allocated IBAN starts with
    pub iban_prefix: String,

    /// Candidates tried when an allocated IBAN collides with an existing one
    pub iban_attempts: u32,

    /// Length of the default statement period
    pub statement_window_days: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_millis(500),
            max_attempts: 3,
            iban_prefix: "PT50".to_string(),
            iban_attempts: 16,
            statement_window_days: 30,
        }
    }
}

impl LedgerConfig {
    /// Defaults, overridden by any `BKL_*` environment variable that is set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(millis) = parse_var::<u64>(&lookup, "BKL_LOCK_TIMEOUT_MS")? {
            config.lock_timeout = Duration::from_millis(millis);
        }

        if let Some(attempts) = parse_var::<u32>(&lookup, "BKL_MAX_ATTEMPTS")? {
            config.max_attempts = attempts;
        }

        if let Some(prefix) = lookup("BKL_IBAN_PREFIX") {
            config.iban_prefix = prefix.trim().to_string();
        }

        if let Some(attempts) = parse_var::<u32>(&lookup, "BKL_IBAN_ATTEMPTS")? {
            config.iban_attempts = attempts;
        }

        if let Some(days) = parse_var::<i64>(&lookup, "BKL_STATEMENT_WINDOW_DAYS")? {
            config.statement_window_days = days;
        }

        if config.max_attempts == 0 {
            Err(ConfigError::InvalidValue("BKL_MAX_ATTEMPTS", "0".to_string()))?
        }

        if config.iban_attempts == 0 {
            Err(ConfigError::InvalidValue("BKL_IBAN_ATTEMPTS", "0".to_string()))?
        }

        if !(1..=MAX_STATEMENT_WINDOW_DAYS).contains(&config.statement_window_days) {
            Err(ConfigError::InvalidValue(
                "BKL_STATEMENT_WINDOW_DAYS",
                config.statement_window_days.to_string(),
            ))?
        }

        log::debug!("Loaded ledger config: {config:?}");

        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>> {
    let raw = match lookup(key) {
        None => return Ok(None),
        Some(raw) => raw,
    };

    let value = raw
        .trim()
        .parse::<T>()
        .ok()
        .with_context(|| ConfigError::InvalidValue(key, raw.clone()))?;

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_vars() {
        let config = LedgerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn overrides() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            ("BKL_LOCK_TIMEOUT_MS", "25"),
            ("BKL_MAX_ATTEMPTS", "5"),
            ("BKL_IBAN_PREFIX", "DE89"),
            ("BKL_IBAN_ATTEMPTS", "2"),
            ("BKL_STATEMENT_WINDOW_DAYS", " 7 "),
        ]))
        .unwrap();

        assert_eq!(config.lock_timeout, Duration::from_millis(25));
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.iban_prefix, "DE89");
        assert_eq!(config.iban_attempts, 2);
        assert_eq!(config.statement_window_days, 7);
    }

    #[test]
    fn invalid_values() {
        assert!(LedgerConfig::from_lookup(lookup_from(&[("BKL_MAX_ATTEMPTS", "many")])).is_err());
        assert!(LedgerConfig::from_lookup(lookup_from(&[("BKL_MAX_ATTEMPTS", "0")])).is_err());
        assert!(LedgerConfig::from_lookup(lookup_from(&[("BKL_LOCK_TIMEOUT_MS", "-1")])).is_err());
    }

    #[test]
    fn statement_window_bounds() {
        for days in ["0", "-7", "1000000000"] {
            let vars = [("BKL_STATEMENT_WINDOW_DAYS", days)];
            assert!(LedgerConfig::from_lookup(lookup_from(&vars)).is_err(), "{days} accepted");
        }

        let vars = [("BKL_STATEMENT_WINDOW_DAYS", "36600")];
        let config = LedgerConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.statement_window_days, 36_600);
    }
}
