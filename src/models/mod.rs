//! Shared data models for flattened content records.
//!
//! A [`Post`] is the template-facing shape of a content record: its own columns
//! (`post_title`, `post_name`, ...) flattened next to the identity, with the
//! optional `fields`, `meta` and `permalink` slots attached by the helper.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::PostId;
use crate::fields::FieldMap;

/// Default post type for records that do not declare one.
pub const DEFAULT_POST_TYPE: &str = "post";

/// Metadata attached to a post, keyed by meta key.
pub type MetaMap = BTreeMap<String, Value>;

/// A content record flattened for template rendering.
///
/// Serializes as a single JSON object:
///
/// ```json
/// {
///   "ID": 12,
///   "post_type": "page",
///   "post_title": "About",
///   "fields": { "hero": { "ID": 30, "post_type": "attachment" } },
///   "meta": { "color": ["blue"] },
///   "permalink": "/page/about/"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "ID")]
    pub id: PostId,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    /// Custom-field values; only present for field-aware lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    /// Every other record column
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

fn default_post_type() -> String {
    DEFAULT_POST_TYPE.to_string()
}

impl Post {
    pub fn new(id: PostId, post_type: impl Into<String>) -> Self {
        Self {
            id,
            post_type: post_type.into(),
            fields: None,
            meta: None,
            permalink: None,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// String attribute lookup, e.g. `post_name` or `post_status`.
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }
}

/// Unexpanded reference to another record: just its identity and type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostRef {
    #[serde(rename = "ID")]
    pub id: PostId,
    pub post_type: String,
}

impl PostRef {
    pub fn new(id: PostId, post_type: impl Into<String>) -> Self {
        Self {
            id,
            post_type: post_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_serializes_flat() {
        let mut post = Post::new(3, "page").with_attribute("post_title", "About");
        post.permalink = Some("/page/about/".to_string());

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(
            value,
            json!({
                "ID": 3,
                "post_type": "page",
                "post_title": "About",
                "permalink": "/page/about/"
            })
        );
    }

    #[test]
    fn test_post_deserializes_missing_type_as_post() {
        let post: Post = serde_json::from_value(json!({ "ID": 9, "post_title": "Hi" })).unwrap();
        assert_eq!(post.post_type, DEFAULT_POST_TYPE);
        assert_eq!(post.attribute_str("post_title"), Some("Hi"));
        assert!(post.fields.is_none());
    }
}
