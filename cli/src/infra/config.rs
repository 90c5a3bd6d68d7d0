//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::SkiffConfig;

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
///
/// Without an explicit path the file is `$SKIFF_CONFIG` or
/// `~/.skiff/config.yaml`.
#[derive(Debug, Default)]
pub struct YamlConfigStore {
    path: Option<PathBuf>,
}

impl YamlConfigStore {
    /// Store at the default location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store at an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<SkiffConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(SkiffConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &SkiffConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        // The file may hold a bearer token.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var("SKIFF_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".skiff").join("config.yaml"))
    }
}

/// Overlay `SKIFF_SERVER_ADDRESS` and `SKIFF_TOKEN` onto a loaded config.
///
/// `lookup` is `std::env::var(..).ok()` in production.
pub fn apply_env_overrides(config: &mut SkiffConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(address) = lookup("SKIFF_SERVER_ADDRESS").filter(|v| !v.is_empty()) {
        config.server.address = Some(address.trim_end_matches('/').to_string());
    }
    if let Some(token) = lookup("SKIFF_TOKEN").filter(|v| !v.is_empty()) {
        config.server.token = Some(token);
    }
}
