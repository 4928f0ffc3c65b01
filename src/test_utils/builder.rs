//! Fluent builder for in-memory content sources.

use serde_json::Value;

use crate::core::PostId;
use crate::fields::{FieldDefinition, FieldMap, FieldValue};
use crate::menu::MenuEntry;
use crate::models::{MetaMap, Post};
use crate::source::MemorySource;

/// Builds a [`MemorySource`] for tests.
#[derive(Debug, Default)]
pub struct SourceBuilder {
    source: MemorySource,
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a published post whose custom fields are given as a JSON object.
    pub fn post(self, id: PostId, post_type: &str, fields: Value) -> Self {
        self.post_with_meta(id, post_type, fields, Value::Object(Default::default()))
    }

    /// Add a published post with custom fields and post meta.
    pub fn post_with_meta(mut self, id: PostId, post_type: &str, fields: Value, meta: Value) -> Self {
        let mut post = Post::new(id, post_type);
        post.fields = Some(field_map(fields));
        post.meta = Some(meta_map(meta));
        self.source.insert_post(post);
        self
    }

    /// Add a fully specified post as stored data.
    pub fn raw_post(mut self, post: Post) -> Self {
        self.source.insert_post(post);
        self
    }

    pub fn field_definition(mut self, definition: FieldDefinition) -> Self {
        self.source.insert_field_definition(definition);
        self
    }

    pub fn term_meta(mut self, id: PostId, meta: Value) -> Self {
        self.source.insert_object_meta("term", id, meta_map(meta));
        self
    }

    pub fn menu(mut self, location: &str, entries: Vec<MenuEntry>) -> Self {
        self.source.insert_menu(location, entries);
        self
    }

    pub fn front_page(mut self, id: PostId) -> Self {
        self.source.front_page = Some(id);
        self
    }

    pub fn build(self) -> MemorySource {
        self.source
    }
}

fn field_map(fields: Value) -> FieldMap {
    match fields {
        Value::Object(map) => map.into_iter().map(|(k, v)| (k, FieldValue::from_json(v))).collect(),
        other => panic!("fields must be a JSON object, got {other}"),
    }
}

fn meta_map(meta: Value) -> MetaMap {
    match meta {
        Value::Object(map) => map.into_iter().collect(),
        other => panic!("meta must be a JSON object, got {other}"),
    }
}
