//! Typed custom-field values.
//!
//! The content source hands over custom fields as loose JSON. [`FieldValue::from_json`]
//! classifies each value once, at ingestion, so the resolver can match on a
//! discriminant instead of probing shapes at every recursion level:
//!
//! | JSON shape                                   | Variant                  |
//! |----------------------------------------------|--------------------------|
//! | object with numeric `ID` and string `post_type` | [`FieldValue::Ref`]   |
//! | other object                                 | [`FieldValue::Group`]    |
//! | array where every element is a reference     | [`FieldValue::Refs`]     |
//! | array holding objects or arrays, no references | [`FieldValue::Repeater`] |
//! | any other array                              | [`FieldValue::List`]     |
//! | anything else                                | [`FieldValue::Scalar`]   |
//!
//! Repeater rows are classified one by one, so a stray scalar row stays a
//! `Scalar` while its sibling rows are still expanded. An array that mixes
//! references with other values is kept as a plain `List` and is never expanded.
//!
//! A reference keeps the object exactly as stored next to its `{ID, post_type}`
//! handle. Until it is expanded it serializes as that stored object, columns
//! such as `post_title` included.
//!
//! Serialization always produces plain JSON, so the template layer sees
//! ordinary objects and arrays regardless of the variant.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::core::PostId;
use crate::models::{Post, PostRef};

/// Custom fields of one record, keyed by field name.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A custom-field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// String, number, boolean or null
    Scalar(Value),
    /// List of values that holds no expandable references
    List(Vec<Value>),
    /// Reference to one record
    Ref(Reference),
    /// Relational list of record references
    Refs(Vec<Reference>),
    /// Sub-field group (a repeater row, or a group field)
    Group(FieldMap),
    /// Ordered rows of groups or nested lists
    Repeater(Vec<FieldValue>),
    /// Expanded reference
    Post(Box<Post>),
    /// Expanded relational list; slots are `Post`, `Missing` or an unexpanded `Ref`
    Posts(Vec<FieldValue>),
    /// Field definition with its value, used by whole-fields lookups
    Definition(Box<FieldDefinition>),
    /// Referenced record that could not be found
    #[default]
    Missing,
}

impl FieldValue {
    /// Classify a raw JSON value.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => match as_post_ref(&map) {
                Some(handle) => Self::Ref(Reference::with_raw(handle, map)),
                None => Self::Group(group_from_map(map)),
            },
            Value::Array(items) => classify_array(items),
            scalar => Self::Scalar(scalar),
        }
    }

    /// Whether the value still holds record references that recursive
    /// expansion would replace.
    pub fn has_references(&self) -> bool {
        match self {
            Self::Ref(_) | Self::Refs(_) => true,
            Self::Group(map) => map.values().any(Self::has_references),
            Self::Repeater(items) | Self::Posts(items) => items.iter().any(Self::has_references),
            _ => false,
        }
    }

    pub fn as_post(&self) -> Option<&Post> {
        match self {
            Self::Post(post) => Some(post),
            _ => None,
        }
    }
}

/// A stored record reference.
///
/// `handle` drives expansion; `raw` is the object as the source reported it
/// and is what an unexpanded reference serializes to.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub handle: PostRef,
    pub raw: Map<String, Value>,
}

impl Reference {
    /// Reference whose stored object holds only the handle columns.
    pub fn new(id: PostId, post_type: impl Into<String>) -> Self {
        let handle = PostRef::new(id, post_type);
        let mut raw = Map::new();
        raw.insert("ID".into(), Value::from(handle.id));
        raw.insert("post_type".into(), Value::from(handle.post_type.clone()));
        Self {
            handle,
            raw,
        }
    }

    fn with_raw(handle: PostRef, raw: Map<String, Value>) -> Self {
        Self {
            handle,
            raw,
        }
    }

    pub fn id(&self) -> PostId {
        self.handle.id
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

fn as_post_ref(map: &Map<String, Value>) -> Option<PostRef> {
    let id = map.get("ID")?.as_u64()?;
    let post_type = map.get("post_type")?.as_str()?;
    Some(PostRef::new(id, post_type))
}

fn group_from_map(map: Map<String, Value>) -> FieldMap {
    map.into_iter().map(|(name, value)| (name, FieldValue::from_json(value))).collect()
}

fn classify_array(items: Vec<Value>) -> FieldValue {
    if items.is_empty() {
        return FieldValue::List(items);
    }

    let handles: Vec<Option<PostRef>> =
        items.iter().map(|item| item.as_object().and_then(as_post_ref)).collect();

    if handles.iter().all(Option::is_some) {
        let refs = items
            .into_iter()
            .zip(handles)
            .filter_map(|(item, handle)| match (item, handle) {
                (Value::Object(raw), Some(handle)) => Some(Reference::with_raw(handle, raw)),
                _ => None,
            })
            .collect();
        return FieldValue::Refs(refs);
    }

    let any_ref = handles.iter().any(Option::is_some);
    let any_nested = items.iter().any(|item| item.is_object() || item.is_array());
    if any_nested && !any_ref {
        return FieldValue::Repeater(items.into_iter().map(FieldValue::from_json).collect());
    }

    FieldValue::List(items)
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(value) => value.serialize(serializer),
            Self::List(values) => values.serialize(serializer),
            Self::Ref(reference) => reference.serialize(serializer),
            Self::Refs(refs) => refs.serialize(serializer),
            Self::Group(map) => map.serialize(serializer),
            Self::Repeater(items) | Self::Posts(items) => items.serialize(serializer),
            Self::Post(post) => post.serialize(serializer),
            Self::Definition(definition) => definition.serialize(serializer),
            Self::Missing => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

/// Definition of a custom field together with its value for one record.
///
/// Mirrors what a field-aware CMS reports for a field: its key, label, name and
/// type, any type-specific settings, and the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default)]
    pub value: FieldValue,
    /// Type-specific settings (choices, return format, ...)
    #[serde(flatten)]
    pub settings: BTreeMap<String, Value>,
}

fn default_field_type() -> String {
    "text".to_string()
}

impl FieldDefinition {
    /// Minimal definition for a field the source has no schema for.
    pub fn bare(name: &str, value: FieldValue) -> Self {
        Self {
            key: format!("field_{name}"),
            label: name.to_string(),
            name: name.to_string(),
            field_type: default_field_type(),
            value,
            settings: BTreeMap::new(),
        }
    }
}
