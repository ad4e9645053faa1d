use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "restoledger.toml",
    "config/restoledger.toml",
    "crates/config/restoledger.toml",
    "../restoledger.toml",
    "../config/restoledger.toml",
    "../crates/config/restoledger.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://restoledger.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Authentication tuning.
///
/// ```
/// use restoledger_config::AuthConfig;
///
/// let auth = AuthConfig::default();
/// assert_eq!(auth.work_factor, 12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// bcrypt cost parameter applied to every password hash.
    #[serde(default = "AuthConfig::default_work_factor")]
    pub work_factor: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            work_factor: Self::default_work_factor(),
        }
    }
}

impl AuthConfig {
    const fn default_work_factor() -> u32 {
        12
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use restoledger_config::load;
///
/// std::env::remove_var("RESTOLEDGER_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.database.url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )
        .unwrap()
        .set_default("auth.work_factor", i64::from(defaults.auth.work_factor))
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("RESTOLEDGER").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("RESTOLEDGER_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via RESTOLEDGER_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded backend configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn defaults_load_without_a_file() {
        std::env::remove_var("RESTOLEDGER_CONFIG");
        std::env::remove_var("RESTOLEDGER_AUTH__WORK_FACTOR");

        let config = load().unwrap();
        assert_eq!(config.database.url, "sqlite://restoledger.db");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.work_factor, 12);
    }

    #[test]
    #[serial]
    fn environment_overrides_work_factor() {
        std::env::remove_var("RESTOLEDGER_CONFIG");
        std::env::set_var("RESTOLEDGER_AUTH__WORK_FACTOR", "4");

        let config = load().unwrap();
        assert_eq!(config.auth.work_factor, 4);

        std::env::remove_var("RESTOLEDGER_AUTH__WORK_FACTOR");
    }

    #[test]
    #[serial]
    fn config_file_overrides_defaults() {
        std::env::remove_var("RESTOLEDGER_AUTH__WORK_FACTOR");

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("restoledger.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[database]").unwrap();
        writeln!(file, "url = \"sqlite://custom.db\"").unwrap();
        writeln!(file, "max_connections = 3").unwrap();

        std::env::set_var("RESTOLEDGER_CONFIG", &path);
        let config = load().unwrap();
        std::env::remove_var("RESTOLEDGER_CONFIG");

        assert_eq!(config.database.url, "sqlite://custom.db");
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.auth.work_factor, 12);
    }
}
