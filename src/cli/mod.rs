//! Command-line interface for dustpress-helper.
//!
//! The `dph` binary loads a content file, flattens records and menus the same
//! way a theme would, and prints the result as JSON, as a tree, or through a
//! Tera template.
//!
//! # Commands
//!
//! - `post` - One record, optionally with resolved custom fields
//! - `posts` - Every record matching a query
//! - `menu` - Nested menu of a location with the active path marked
//! - `render` - Render a template against a post and menus
//!
//! # Global Options
//!
//! - `--source <FILE>` - Content file (JSON or TOML), default `content.json`
//! - `--config <FILE>` - Configuration file, default `~/.dustpress/config.toml`
//! - `--verbose` / `--quiet` - Log level
//!
//! # Examples
//!
//! ```bash
//! dph --source site.json post 12 --recursive
//! dph --source site.toml menu primary --current 12 --format json
//! dph render page.tera --post 12 --menu primary
//! ```

mod common;
mod menu;
mod post;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::CONFIG_ENV_VAR;

/// Environment variable naming the content file.
pub const SOURCE_ENV_VAR: &str = "DUSTPRESS_SOURCE";

/// Settings derived from the global flags.
///
/// Kept separate from [`Cli`] so tests and embedders can run commands with an
/// explicit configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` disables logging
    pub log_level: Option<String>,

    /// Configuration file overriding the default lookup
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Logs go to
    /// stderr so JSON on stdout stays clean. Does nothing when a subscriber is
    /// already installed.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Flatten content for templates.
#[derive(Parser)]
#[command(
    name = "dph",
    about = "Flatten CMS content (posts, relational fields, menus) for templates",
    version,
    author,
    long_about = "dph loads posts, custom fields and menus from a content file and flattens them into plain JSON, resolving relational fields and marking the active menu path."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Content file (JSON or TOML)
    #[arg(short, long, global = true, env = SOURCE_ENV_VAR, default_value = "content.json")]
    source: PathBuf,

    /// Configuration file
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// No logging
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one record as JSON
    Post(post::PostCommand),

    /// Print every record matching a query as JSON
    Posts(post::PostsCommand),

    /// Print the nested menu of a location
    Menu(menu::MenuCommand),

    /// Render a Tera template against content
    Render(render::RenderCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// `--verbose` logs at debug, `--quiet` disables logging, otherwise info.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let source = self.source;
        let config_path = config.config_path;
        match self.command {
            Commands::Post(cmd) => cmd.execute(&source, config_path).await,
            Commands::Posts(cmd) => cmd.execute(&source, config_path).await,
            Commands::Menu(cmd) => cmd.execute(&source, config_path).await,
            Commands::Render(cmd) => cmd.execute(&source, config_path).await,
        }
    }
}
