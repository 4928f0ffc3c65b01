//! Render a Tera template against flattened content.
//!
//! ```bash
//! dph render page.html.tera --post 12 --menu primary --vars site.json
//! ```
//!
//! The template sees `post` (fields resolved), `menus.<location>` built with
//! the post as the current object, and the variables file merged at the root.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::common::{CommandContext, OptionArgs};
use crate::core::{HelperError, PostId};
use crate::menu::{CurrentContext, menu_as_items};
use crate::posts::PostHelper;
use crate::templating::{TemplateContextBuilder, TemplateRenderer};

/// Render a template file.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template file
    template: PathBuf,

    /// Post exposed as `post`, also the current object for menus
    #[arg(long, value_name = "ID")]
    post: Option<PostId>,

    /// Menu location exposed as `menus.<location>` (repeatable)
    #[arg(short, long = "menu", value_name = "LOCATION")]
    menus: Vec<String>,

    /// JSON file with extra variables merged into the context
    #[arg(long, value_name = "FILE")]
    vars: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    options: OptionArgs,
}

impl RenderCommand {
    pub async fn execute(self, source: &Path, config: Option<PathBuf>) -> Result<()> {
        let ctx = CommandContext::load(source, config).await?;
        let template = fs::read_to_string(&self.template)
            .await
            .with_context(|| format!("Failed to read template {}", self.template.display()))?;

        let mut builder = TemplateContextBuilder::new();

        let current = match self.post {
            Some(id) => {
                let options = self.options.resolve(&ctx.config.defaults)?;
                let post = PostHelper::new(&ctx.source, &ctx.config.resolver)
                    .get_acf_post(id, &options)?
                    .ok_or(HelperError::PostNotFound {
                        id,
                    })?;
                builder = builder.with_post(post);
                CurrentContext::for_post(id)
            }
            None => CurrentContext::default(),
        };

        for location in &self.menus {
            ctx.require_menu_location(location)?;
            let items = menu_as_items(&ctx.source, location, 0, None, &current, &ctx.config.menu);
            builder = builder.with_menu(location.clone(), items);
        }

        if let Some(path) = &self.vars {
            builder = builder.with_vars(load_vars(path).await?);
        }

        let rendered = TemplateRenderer::new().render_str(&template, &builder.build()?)?;

        match &self.output {
            Some(path) => {
                fs::write(path, rendered)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!("Rendered {} to {}", self.template.display(), path.display());
            }
            None => print!("{rendered}"),
        }
        Ok(())
    }
}

async fn load_vars(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read variables from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse variables from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_vars() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vars.json");
        fs::write(&path, r#"{ "site": { "name": "Demo" } }"#).await.unwrap();

        let vars = load_vars(&path).await.unwrap();
        assert_eq!(vars["site"]["name"], "Demo");
    }

    #[tokio::test]
    async fn test_load_vars_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vars.json");
        fs::write(&path, "{ nope").await.unwrap();

        let err = load_vars(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse variables"));
    }
}
