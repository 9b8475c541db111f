use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::{
    consts::config_const::{
        DEFAULT_ADMIN_SECRET, DEFAULT_HOST, DEFAULT_KEYS_PATH, DEFAULT_PORT, DEFAULT_ROSTER_PATH,
    },
    errors::{Error, Result},
};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub admin_secret: String,
    pub roster_path: PathBuf,
    pub keys_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let admin_secret = lookup("ADMIN_SECRET")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                warn!("ADMIN_SECRET not set, using the built-in fallback. Set it before deploying");
                DEFAULT_ADMIN_SECRET.to_string()
            });

        Ok(Self {
            host: try_load(&lookup, "HOST", DEFAULT_HOST)?,
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            admin_secret,
            roster_path: try_load(&lookup, "ROSTER_PATH", DEFAULT_ROSTER_PATH)?,
            keys_path: try_load(&lookup, "KEYS_PATH", DEFAULT_KEYS_PATH)?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {key} value: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.admin_secret, DEFAULT_ADMIN_SECRET);
        assert_eq!(config.address(), "0.0.0.0:10000");
        assert_eq!(config.roster_path, PathBuf::from(DEFAULT_ROSTER_PATH));
        assert_eq!(config.keys_path, PathBuf::from(DEFAULT_KEYS_PATH));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("ADMIN_SECRET", "hunter2"),
            ("PORT", "8080"),
            ("ROSTER_PATH", "/srv/roster.csv"),
        ])
        .unwrap();
        assert_eq!(config.admin_secret, "hunter2");
        assert_eq!(config.port, 8080);
        assert_eq!(config.roster_path, PathBuf::from("/srv/roster.csv"));
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(matches!(load(&[("PORT", "eighty")]), Err(Error::Config(_))));
    }
}
