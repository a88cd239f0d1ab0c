use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Anthropic API key. `ANTHROPIC_API_KEY` overrides this at load time.
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Messages API base URL override; leave unset for production.
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "claude-3-5-sonnet-latest".into()
}

impl Default for Config {
    fn default() -> Self {
        let home = UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
        Self {
            config_path: home.join(".duncall").join("config.toml"),
            api_key: None,
            model: default_model(),
            base_url: None,
        }
    }
}

impl Config {
    /// Load the config file, creating it with defaults on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".to_string()))?;
        let duncall_dir = home.join(".duncall");
        let config_path = duncall_dir.join("config.toml");

        if !duncall_dir.exists() {
            fs::create_dir_all(&duncall_dir)?;
        }

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.save()?;
            config
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path (tests and non-standard setups).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }

        if let Ok(model) = std::env::var("DUNCALL_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    #[test]
    fn default_has_sane_values() {
        let config = Config::default();
        assert!(config.model.contains("claude"));
        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            config_path: path.clone(),
            api_key: Some("sk-ant-test".into()),
            model: "claude-3-5-haiku-latest".into(),
            base_url: None,
        };
        config.save().unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("sk-ant-test"));
        assert_eq!(loaded.model, "claude-3-5-haiku-latest");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"sk-ant-test\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.model, default_model());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [broken\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn env_api_key_overrides_file_value() {
        let _guard = env_lock();
        let mut config = Config {
            api_key: Some("from-file".into()),
            ..Config::default()
        };

        // SAFETY: serialized by ENV_LOCK; no other thread reads these vars.
        unsafe { std::env::set_var("ANTHROPIC_API_KEY", "from-env") };
        config.apply_env_overrides();
        unsafe { std::env::remove_var("ANTHROPIC_API_KEY") };

        assert_eq!(config.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn empty_env_value_is_ignored() {
        let _guard = env_lock();
        let mut config = Config {
            api_key: Some("from-file".into()),
            ..Config::default()
        };

        unsafe { std::env::set_var("ANTHROPIC_API_KEY", "") };
        config.apply_env_overrides();
        unsafe { std::env::remove_var("ANTHROPIC_API_KEY") };

        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }
}
