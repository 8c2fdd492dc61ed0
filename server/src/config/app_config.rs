//! Runtime application configuration loaded from the environment.

use std::path::PathBuf;

use anyhow::{anyhow, bail};

use super::defaults::get_default;
use super::validation::validate_setting;

/// Runtime configuration, immutable after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_address: String,
    pub server_port: u16,
    pub keep_alive_port: u16,
    pub keep_alive_enabled: bool,
    pub font_path: PathBuf,
    pub accept_invalid_certs: bool,
    pub fetch_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".into(),
            server_port: 8080,
            keep_alive_port: 8081,
            keep_alive_enabled: true,
            font_path: PathBuf::from("NeueMontreal-Regular.otf"),
            accept_invalid_certs: false,
            fetch_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset or blank keys fall back to their defaults; every value is
    /// validated before it is parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> Result<String, anyhow::Error> {
            let value = lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .or_else(|| get_default(key).map(str::to_string))
                .unwrap_or_default();
            validate_setting(key, &value).map_err(|e| anyhow!("invalid {key}={value:?}: {e}"))?;
            Ok(value)
        };

        let config = Self {
            bind_address: g("BIND_ADDRESS")?,
            server_port: g("SERVER_PORT")?.parse()?,
            keep_alive_port: g("KEEP_ALIVE_PORT")?.parse()?,
            keep_alive_enabled: g("KEEP_ALIVE_ENABLED")? == "true",
            font_path: PathBuf::from(g("FONT_PATH")?),
            accept_invalid_certs: g("ACCEPT_INVALID_CERTS")? == "true",
            fetch_timeout_secs: g("FETCH_TIMEOUT_SECS")?.parse()?,
        };

        if config.keep_alive_enabled && config.server_port == config.keep_alive_port {
            bail!(
                "SERVER_PORT and KEEP_ALIVE_PORT must differ (both {})",
                config.server_port
            );
        }

        Ok(config)
    }

    pub fn server_addr(&self) -> String {
        join_host_port(&self.bind_address, self.server_port)
    }

    pub fn keep_alive_addr(&self) -> String {
        join_host_port(&self.bind_address, self.keep_alive_port)
    }
}

fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, anyhow::Error> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(load(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("SERVER_PORT", "9000"),
            ("KEEP_ALIVE_ENABLED", "false"),
            ("ACCEPT_INVALID_CERTS", "true"),
            ("FONT_PATH", " fonts/Inter.ttf "),
        ])
        .unwrap();
        assert_eq!(config.server_port, 9000);
        assert!(!config.keep_alive_enabled);
        assert!(config.accept_invalid_certs);
        assert_eq!(config.font_path, PathBuf::from("fonts/Inter.ttf"));
    }

    #[test]
    fn blank_value_falls_back_to_default() {
        let config = load(&[("FETCH_TIMEOUT_SECS", "  ")]).unwrap();
        assert_eq!(config.fetch_timeout_secs, 30);
    }

    #[test]
    fn invalid_value_names_the_key() {
        let err = load(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"), "{err}");
    }

    #[test]
    fn colliding_ports_are_rejected_only_when_keep_alive_runs() {
        assert!(load(&[("KEEP_ALIVE_PORT", "8080")]).is_err());
        assert!(load(&[("KEEP_ALIVE_PORT", "8080"), ("KEEP_ALIVE_ENABLED", "false")]).is_ok());
    }

    #[test]
    fn addresses_join_host_and_port() {
        let mut config = AppConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        config.bind_address = "::".into();
        assert_eq!(config.keep_alive_addr(), "[::]:8081");
    }
}
