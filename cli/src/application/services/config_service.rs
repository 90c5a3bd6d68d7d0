//! Application service — configuration use-cases.

use crate::application::ports::ConfigStore;
use crate::domain::config::{SkiffConfig, apply_config_value};
use anyhow::Result;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<SkiffConfig> {
    store.load()
}

/// Validate and persist a single `key = value` setting.
///
/// The file is left untouched when validation fails.
pub fn set_config_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<SkiffConfig> {
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}
