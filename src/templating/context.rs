//! Template context building.
//!
//! Collects flattened posts and menus into one JSON object that Tera (or any
//! other engine fed with JSON) can render.
//!
//! # Context Structure
//!
//! ```json
//! {
//!   "post":  { "ID": 1, "post_title": "...", "fields": { ... }, "meta": { ... }, "permalink": "/..." },
//!   "posts": [ { ... }, { ... } ],
//!   "menus": {
//!     "primary": [ { "ID": 100, "title": "Home", "classes": [...], "Submenu": [...] } ]
//!   },
//!   "site": { "name": "custom variables are merged at the root" }
//! }
//! ```

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value, to_value};
use std::collections::BTreeMap;
use tera::Context as TeraContext;

use crate::menu::MenuEntry;
use crate::models::Post;
use crate::utils::deep_merge_json;

/// Builder for the data handed to a template.
#[derive(Debug, Default)]
pub struct TemplateContextBuilder {
    post: Option<Post>,
    posts: Option<Vec<Post>>,
    menus: BTreeMap<String, Vec<MenuEntry>>,
    vars: Option<Value>,
}

impl TemplateContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose a single record as `post`.
    #[must_use]
    pub fn with_post(mut self, post: Post) -> Self {
        self.post = Some(post);
        self
    }

    /// Expose a record list as `posts`.
    #[must_use]
    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = Some(posts);
        self
    }

    /// Expose a built menu as `menus.<location>`.
    #[must_use]
    pub fn with_menu(mut self, location: impl Into<String>, items: Vec<MenuEntry>) -> Self {
        self.menus.insert(location.into(), items);
        self
    }

    /// Custom variables, deep-merged over the root last so they can extend or
    /// override anything above. Must be a JSON object.
    #[must_use]
    pub fn with_vars(mut self, vars: Value) -> Self {
        self.vars = Some(vars);
        self
    }

    /// The context as a JSON value.
    pub fn build_value(&self) -> Result<Value> {
        let mut root = Map::new();

        if let Some(post) = &self.post {
            root.insert("post".to_string(), to_value(post).context("Failed to serialize post")?);
        }
        if let Some(posts) = &self.posts {
            root.insert("posts".to_string(), to_value(posts).context("Failed to serialize posts")?);
        }
        if !self.menus.is_empty() {
            root.insert(
                "menus".to_string(),
                to_value(&self.menus).context("Failed to serialize menus")?,
            );
        }

        let root = Value::Object(root);
        match &self.vars {
            Some(vars) if vars.is_object() => Ok(deep_merge_json(root, vars)),
            Some(other) => Err(anyhow!("Template variables must be a JSON object, got: {other}")),
            None => Ok(root),
        }
    }

    /// The context as a Tera context.
    pub fn build(&self) -> Result<TeraContext> {
        let value = self.build_value()?;
        TeraContext::from_value(value).context("Failed to build template context")
    }
}
