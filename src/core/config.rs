use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base URL used when building approval links for operator alerts.
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// Directory the static portal pages are served from.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_journal_path")]
    pub journal_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Balance granted (pending) to every new registration.
    #[serde(default = "default_initial_grant")]
    pub initial_grant: f64,
    /// Advertised unlock fee; shown to users, never charged.
    #[serde(default = "default_unlock_fee")]
    pub unlock_fee: f64,
}

/// Operator secrets. These have no defaults on purpose: the process refuses
/// to start without externally supplied values.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Master operator account checked before any user lookup at login.
    pub master_username: String,
    pub master_password: String,
    /// Secret for the admin panel login that mints session tokens.
    pub panel_password: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            journal_path: default_journal_path(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            initial_grant: default_initial_grant(),
            unlock_fee: default_unlock_fee(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    3000
}

fn default_public_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_journal_path() -> PathBuf {
    PathBuf::from("vault.journal")
}

fn default_initial_grant() -> f64 {
    10000.00
}

fn default_unlock_fee() -> f64 {
    1000.00
}

fn default_session_ttl() -> i64 {
    3600 // 1 hour
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.server.public_url.is_empty() {
            bail!("public_url must not be empty");
        }

        if self.wallet.initial_grant < 0.0 {
            bail!("initial_grant must be non-negative");
        }

        if self.wallet.unlock_fee < 0.0 {
            bail!("unlock_fee must be non-negative");
        }

        if self.admin.master_username.is_empty() {
            bail!("master_username must not be empty");
        }

        if self.admin.master_password.is_empty() {
            bail!("master_password must not be empty");
        }

        if self.admin.panel_password.is_empty() {
            bail!("panel_password must not be empty");
        }

        if self.admin.session_ttl_seconds <= 0 {
            bail!("session_ttl_seconds must be greater than 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }

    /// Listening port, with the `PORT` environment variable taking
    /// precedence over the config file value.
    pub fn effective_port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_toml() -> &'static str {
        r#"
            [server]
            port = 3000

            [admin]
            master_username = "admin"
            master_password = "master-secret"
            panel_password = "panel-secret"
        "#
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: Config = toml::from_str(minimal_toml()).unwrap();
        config.validate().unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.wallet.initial_grant, 10000.00);
        assert_eq!(config.wallet.unlock_fee, 1000.00);
        assert_eq!(config.store.journal_path, PathBuf::from("vault.journal"));
        assert_eq!(config.admin.session_ttl_seconds, 3600);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_zero_port_rejected() {
        let toml = minimal_toml().replace("port = 3000", "port = 0");
        let config: Config = toml::from_str(&toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_panel_password_rejected() {
        let toml = minimal_toml().replace("panel-secret", "");
        let config: Config = toml::from_str(&toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_admin_section_fails_to_parse() {
        let result: Result<Config, _> = toml::from_str("[server]\nport = 3000\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let toml = format!("{}\n[logging]\nlevel = \"loud\"\n", minimal_toml());
        let config: Config = toml::from_str(&toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_grant_rejected() {
        let toml = format!("{}\n[wallet]\ninitial_grant = -1.0\n", minimal_toml());
        let config: Config = toml::from_str(&toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", minimal_toml()).unwrap();

        let config = Config::from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.admin.master_username, "admin");
    }
}
