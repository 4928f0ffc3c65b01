//! Shared pieces of the CLI commands.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};

use crate::config::HelperConfig;
use crate::core::HelperError;
use crate::posts::{AcfOptions, MetaKeys};
use crate::source::{ContentSource, MemorySource};

/// Content source and configuration loaded once per invocation.
#[derive(Debug)]
pub struct CommandContext {
    pub source: MemorySource,
    pub config: HelperConfig,
}

impl CommandContext {
    pub async fn load(source_path: &Path, config_path: Option<PathBuf>) -> Result<Self> {
        let config = HelperConfig::load_with_optional(config_path)
            .await
            .context("Failed to load configuration")?;
        let source = MemorySource::load(source_path).await?;
        tracing::debug!("Loaded {} posts from {}", source.len(), source_path.display());

        Ok(Self {
            source,
            config,
        })
    }

    /// Fail with the registered locations when `location` has no menu.
    pub fn require_menu_location(&self, location: &str) -> Result<(), HelperError> {
        let available = self.source.menu_locations();
        if available.iter().any(|l| l == location) {
            Ok(())
        } else {
            Err(HelperError::MenuNotFound {
                location: location.to_string(),
                available,
            })
        }
    }
}

/// Lookup flags shared by `post` and `posts`.
///
/// Only flags that are actually given override the configured defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Resolve custom fields
    #[arg(long)]
    pub acf: bool,

    /// Expand relational fields into full records (implies --acf)
    #[arg(short, long)]
    pub recursive: bool,

    /// Replace field values with their full field definitions (implies --acf)
    #[arg(long)]
    pub whole_fields: bool,

    /// Metadata to attach: `all` or a comma separated key list
    #[arg(long, value_name = "KEYS")]
    pub meta: Option<MetaKeys>,

    /// Attach only the first value of each meta key
    #[arg(long)]
    pub single: bool,

    /// Metadata namespace
    #[arg(long, value_name = "TYPE")]
    pub meta_type: Option<String>,
}

impl OptionArgs {
    /// Whether custom fields should be resolved.
    pub fn wants_fields(&self, defaults: &AcfOptions) -> bool {
        self.acf || self.recursive || self.whole_fields || defaults.recursive || defaults.whole_fields
    }

    /// The given flags as option arguments for [`AcfOptions::merged`].
    pub fn to_json_args(&self) -> Result<Value> {
        let mut args = Map::new();
        if self.recursive {
            args.insert("recursive".into(), json!(true));
        }
        if self.whole_fields {
            args.insert("whole_fields".into(), json!(true));
        }
        if self.single {
            args.insert("single".into(), json!(true));
        }
        if let Some(meta) = &self.meta {
            args.insert("meta_keys".into(), serde_json::to_value(meta)?);
        }
        if let Some(meta_type) = &self.meta_type {
            args.insert("meta_type".into(), json!(meta_type));
        }
        Ok(Value::Object(args))
    }

    /// Configured defaults with these flags merged over them.
    pub fn resolve(&self, defaults: &AcfOptions) -> Result<AcfOptions> {
        defaults.merged(&self.to_json_args()?)
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{output}");
    Ok(())
}
