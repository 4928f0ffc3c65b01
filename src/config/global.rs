//! Global configuration for dustpress-helper.
//!
//! # Location
//!
//! - **Unix/macOS**: `~/.dustpress/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\dustpress\config.toml`
//!
//! The location can be overridden using the `DUSTPRESS_CONFIG` environment variable
//! or the `--config` flag. A missing file means built-in defaults.
//!
//! # File Format
//!
//! ```toml
//! # Defaults merged under every lookup; per-call arguments win
//! [defaults]
//! meta_type = "post"
//! meta_keys = "all"
//! single = true
//! recursive = false
//! whole_fields = false
//!
//! # Relational expansion guard
//! [resolver]
//! max_depth = 8
//! on_cycle = "truncate"   # or "error"
//!
//! # CSS classes assigned by the menu builder
//! [menu]
//! current_item_class = "current-menu-item"
//! current_parent_class = "current-menu-parent"
//! has_children_class = "menu-item-has-children"
//! item_class = "menu-item"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::HelperError;
use crate::posts::AcfOptions;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "DUSTPRESS_CONFIG";

/// Default nesting limit for relational expansion.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Option defaults for post lookups
    #[serde(default)]
    pub defaults: AcfOptions,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub menu: MenuConfig,
}

/// What to do when relational expansion meets a loop or the depth limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Leave the offending reference unexpanded and keep going
    #[default]
    Truncate,
    /// Abort the lookup with an error
    Error,
}

/// Limits for recursive relational expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Maximum number of nested reference expansions below the requested post
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default)]
    pub on_cycle: CyclePolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            on_cycle: CyclePolicy::default(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Class names assigned to built menu entries.
///
/// Every entry also gets `<item_class>-<object id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub current_item_class: String,
    pub current_parent_class: String,
    pub has_children_class: String,
    pub item_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            current_item_class: "current-menu-item".to_string(),
            current_parent_class: "current-menu-parent".to_string(),
            has_children_class: "menu-item-has-children".to_string(),
            item_class: "menu-item".to_string(),
        }
    }
}

impl HelperConfig {
    /// Load from an explicit path, the environment override, or the default
    /// location, falling back to defaults when no file exists.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from)) {
            Some(path) => path,
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::debug!("No default config location: {e}");
                    return Ok(Self::default());
                }
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), HelperError> {
        let menu = &self.menu;
        let classes = [
            ("current_item_class", &menu.current_item_class),
            ("current_parent_class", &menu.current_parent_class),
            ("has_children_class", &menu.has_children_class),
            ("item_class", &menu.item_class),
        ];
        if let Some((name, _)) = classes.iter().find(|(_, class)| class.trim().is_empty()) {
            return Err(HelperError::ConfigError {
                message: format!("[menu] {name} cannot be empty"),
            });
        }
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("dustpress")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".dustpress")
        };

        Ok(config_dir.join("config.toml"))
    }
}
