//! In-memory content source backed by a content file.
//!
//! # File Format
//!
//! JSON (or TOML, picked by the `.toml` extension):
//!
//! ```json
//! {
//!   "front_page": 2,
//!   "posts": [
//!     {
//!       "ID": 2, "post_type": "page", "post_title": "Home", "post_name": "home",
//!       "fields": { "featured": [{ "ID": 7, "post_type": "post" }] },
//!       "meta": { "color": ["blue"] }
//!     }
//!   ],
//!   "field_definitions": {
//!     "featured": { "key": "field_1", "label": "Featured", "type": "relationship" }
//!   },
//!   "object_meta": { "term": { "5": { "icon": ["star"] } } },
//!   "menus": {
//!     "primary": [
//!       { "ID": 100, "menu_item_parent": 0, "object_id": 2, "object": "page", "title": "Home" }
//!     ]
//!   }
//! }
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tokio::fs;

use super::ContentSource;
use crate::core::{HelperError, PostId};
use crate::fields::{FieldDefinition, FieldMap};
use crate::menu::MenuEntry;
use crate::models::{MetaMap, Post};
use crate::posts::{DEFAULT_META_TYPE, PostQuery};

/// Metadata of non-post objects: meta type -> object id -> key -> values.
type ObjectMeta = BTreeMap<String, BTreeMap<String, MetaMap>>;

/// Content source holding every record in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySource {
    /// Record used as the site front page; its permalink is `/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_page: Option<PostId>,
    #[serde(default)]
    posts: Vec<Post>,
    #[serde(default)]
    field_definitions: BTreeMap<String, FieldDefinition>,
    #[serde(default)]
    object_meta: ObjectMeta,
    #[serde(default)]
    menus: BTreeMap<String, Vec<MenuEntry>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a content file, choosing the parser by extension.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HelperError::SourceNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).await.map_err(HelperError::from)?;
        let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let parsed = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        };

        parsed.map_err(|e| {
            HelperError::SourceParseError {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let source: Self = serde_json::from_str(content)?;
        source.warn_on_duplicates();
        Ok(source)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let source: Self = toml::from_str(content)?;
        source.warn_on_duplicates();
        Ok(source)
    }

    /// Add a record. Its `fields`, `meta` and `permalink` become the stored data.
    pub fn insert_post(&mut self, post: Post) {
        self.posts.retain(|p| p.id != post.id);
        self.posts.push(post);
    }

    pub fn insert_field_definition(&mut self, definition: FieldDefinition) {
        self.field_definitions.insert(definition.name.clone(), definition);
    }

    pub fn insert_object_meta(&mut self, meta_type: &str, id: PostId, meta: MetaMap) {
        self.object_meta.entry(meta_type.to_string()).or_default().insert(id.to_string(), meta);
    }

    pub fn insert_menu(&mut self, location: impl Into<String>, entries: Vec<MenuEntry>) {
        self.menus.insert(location.into(), entries);
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn stored(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    fn meta_for(&self, meta_type: &str, id: PostId) -> Option<&MetaMap> {
        if meta_type == DEFAULT_META_TYPE {
            self.stored(id)?.meta.as_ref()
        } else {
            self.object_meta.get(meta_type)?.get(&id.to_string())
        }
    }

    fn warn_on_duplicates(&self) {
        let mut seen = HashSet::new();
        for post in &self.posts {
            if !seen.insert(post.id) {
                tracing::warn!("Duplicate post ID {} in content source; first one wins", post.id);
            }
        }
    }
}

/// Stored meta values are lists; a bare value counts as a one-element list.
fn meta_values(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

fn empty_meta(key: Option<&str>, single: bool) -> Value {
    match (key, single) {
        (None, _) => Value::Object(Map::new()),
        (Some(_), true) => Value::String(String::new()),
        (Some(_), false) => Value::Array(Vec::new()),
    }
}

impl ContentSource for MemorySource {
    fn post(&self, id: PostId) -> Option<Post> {
        self.stored(id).map(|stored| Post {
            fields: None,
            meta: None,
            permalink: None,
            ..stored.clone()
        })
    }

    fn query(&self, query: &PostQuery) -> Vec<Post> {
        let matches = |post: &&Post| {
            post.attribute_str("post_status").unwrap_or(PostQuery::DEFAULT_STATUS) == query.status()
                && query.post_type.as_deref().is_none_or(|t| post.post_type == t)
        };

        let selected: Vec<&Post> = if query.include.is_empty() {
            self.posts.iter().filter(matches).collect()
        } else {
            query.include.iter().filter_map(|id| self.stored(*id)).filter(matches).collect()
        };

        let limit = query.max_results().unwrap_or(usize::MAX);
        selected.into_iter().take(limit).filter_map(|p| self.post(p.id)).collect()
    }

    fn fields(&self, id: PostId) -> Option<FieldMap> {
        self.stored(id).map(|p| p.fields.clone().unwrap_or_default())
    }

    fn field_definition(&self, name: &str, id: PostId) -> Option<FieldDefinition> {
        let value = self.stored(id)?.fields.as_ref()?.get(name)?.clone();
        let definition = match self.field_definitions.get(name) {
            Some(schema) => FieldDefinition {
                name: name.to_string(),
                value,
                ..schema.clone()
            },
            None => FieldDefinition::bare(name, value),
        };
        Some(definition)
    }

    fn metadata(&self, meta_type: &str, id: PostId, key: Option<&str>, single: bool) -> Value {
        let Some(meta) = self.meta_for(meta_type, id) else {
            return empty_meta(key, single);
        };

        match key {
            None => Value::Object(
                meta.iter().map(|(k, v)| (k.clone(), Value::Array(meta_values(v)))).collect(),
            ),
            Some(key) => match meta.get(key) {
                Some(value) if single => meta_values(value)
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| Value::String(String::new())),
                Some(value) => Value::Array(meta_values(value)),
                None => empty_meta(Some(key), single),
            },
        }
    }

    fn permalink(&self, id: PostId) -> Option<String> {
        let post = self.stored(id)?;
        if let Some(permalink) = &post.permalink {
            return Some(permalink.clone());
        }
        if self.front_page == Some(id) {
            return Some("/".to_string());
        }

        let slug = post.attribute_str("post_name").map_or_else(|| id.to_string(), String::from);
        Some(match post.post_type.as_str() {
            "post" | "page" => format!("/{slug}/"),
            other => format!("/{other}/{slug}/"),
        })
    }

    fn menu_entries(&self, location: &str) -> Option<Vec<MenuEntry>> {
        self.menus.get(location).cloned()
    }

    fn menu_locations(&self) -> Vec<String> {
        self.menus.keys().cloned().collect()
    }
}
