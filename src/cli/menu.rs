//! Build a nested menu for a location and print it.
//!
//! # Examples
//!
//! Whole menu with the page being viewed:
//! ```bash
//! dph menu primary --current 12
//! ```
//!
//! Submenu below the entry linking to page 4, viewing a category archive:
//! ```bash
//! dph menu primary --parent 4 --parent-type page --term 7 --taxonomy category
//! ```
//!
//! # Output Format
//!
//! ## Tree Format (Default)
//! ```text
//! primary
//! ├── Home /home/ [current-menu-parent]
//! │   └── About /about/ [current-menu-item]
//! └── Blog /blog/
//! ```
//!
//! ## JSON Format
//! The built entries, each with `classes` and a nested `Submenu` list.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::common::{CommandContext, print_json};
use crate::config::MenuConfig;
use crate::core::PostId;
use crate::menu::{CurrentContext, MenuEntry, MenuTreeBuilder};
use crate::source::ContentSource;

/// Print the nested menu of a location.
#[derive(Args, Debug)]
pub struct MenuCommand {
    /// Menu location name
    location: String,

    /// Build only the submenu below the entry linking to this object
    #[arg(short, long, default_value_t = 0)]
    parent: PostId,

    /// Object type of --parent; any type matches when omitted
    #[arg(long)]
    parent_type: Option<String>,

    /// Post being viewed
    #[arg(long)]
    current: Option<PostId>,

    /// Taxonomy term being viewed (requires --taxonomy)
    #[arg(long, requires = "taxonomy")]
    term: Option<PostId>,

    /// Taxonomy of --term
    #[arg(long, requires = "term")]
    taxonomy: Option<String>,

    /// Treat this object as current instead of --current
    #[arg(long = "override", value_name = "ID")]
    override_id: Option<PostId>,

    /// Output format (tree, json)
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,
}

impl MenuCommand {
    pub async fn execute(self, source: &Path, config: Option<PathBuf>) -> Result<()> {
        self.validate_arguments()?;

        let ctx = CommandContext::load(source, config).await?;
        ctx.require_menu_location(&self.location)?;

        let entries = ctx.source.menu_entries(&self.location).unwrap_or_default();
        let current = self.current_context();
        let items = MenuTreeBuilder::new(&entries, &current, &ctx.config.menu)
            .build(self.parent, self.parent_type.as_deref());

        tracing::debug!(
            "Built {} menu entries for '{}'",
            items.iter().map(MenuEntry::count).sum::<usize>(),
            self.location
        );

        match self.format.as_str() {
            "json" => print_json(&items),
            _ => {
                self.output_tree(&items, &ctx.config.menu);
                Ok(())
            }
        }
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "tree" | "json" => Ok(()),
            _ => Err(anyhow!("Invalid format '{}'. Valid formats are: tree, json", self.format)),
        }
    }

    fn current_context(&self) -> CurrentContext {
        let context = CurrentContext {
            post_id: self.current,
            ..CurrentContext::default()
        };
        let context = match (self.term, &self.taxonomy) {
            (Some(id), Some(taxonomy)) => context.with_term(id, taxonomy.clone()),
            _ => context,
        };
        context.with_override(self.override_id)
    }

    fn output_tree(&self, items: &[MenuEntry], classes: &MenuConfig) {
        if items.is_empty() {
            println!("No menu entries found.");
            return;
        }

        println!("{}", self.location.cyan().bold());
        for (i, item) in items.iter().enumerate() {
            print_entry(item, "", i == items.len() - 1, classes);
        }
    }
}

fn print_entry(entry: &MenuEntry, prefix: &str, is_last: bool, classes: &MenuConfig) {
    println!("{prefix}{}", format_entry(entry, is_last, classes));

    let child_prefix = if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };
    for (i, child) in entry.submenu.iter().enumerate() {
        print_entry(child, &child_prefix, i == entry.submenu.len() - 1, classes);
    }
}

fn format_entry(entry: &MenuEntry, is_last: bool, classes: &MenuConfig) -> String {
    let connector = if is_last { "└── " } else { "├── " };

    let title = if entry.title.is_empty() {
        format!("#{}", entry.object_id)
    } else {
        entry.title.clone()
    };
    let url = if entry.url.is_empty() {
        String::new()
    } else {
        format!(" {}", entry.url.bright_black())
    };
    let marker = if entry.has_class(&classes.current_item_class) {
        format!(" [{}]", classes.current_item_class).green().to_string()
    } else if entry.has_class(&classes.current_parent_class) {
        format!(" [{}]", classes.current_parent_class).yellow().to_string()
    } else {
        String::new()
    };

    format!("{connector}{}{url}{marker}", title.cyan())
}
