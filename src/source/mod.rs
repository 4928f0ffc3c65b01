//! Content source abstraction.
//!
//! The helper never talks to a CMS directly. Everything it flattens comes
//! through a [`ContentSource`]: records, their custom fields and field
//! definitions, metadata, permalinks and menus. All operations are synchronous
//! lookups over data the source already holds.
//!
//! [`MemorySource`] is the bundled implementation, loaded from a JSON or TOML
//! content file.

mod memory;

pub use memory::MemorySource;

use serde_json::Value;

use crate::core::PostId;
use crate::fields::{FieldDefinition, FieldMap};
use crate::menu::MenuEntry;
use crate::models::Post;
use crate::posts::PostQuery;

/// Read-only access to content data.
pub trait ContentSource {
    /// Record columns for `id`, without fields, meta or permalink.
    fn post(&self, id: PostId) -> Option<Post>;

    /// Records matching `query`, in source order (or `include` order).
    fn query(&self, query: &PostQuery) -> Vec<Post>;

    /// Custom fields stored on `id`.
    fn fields(&self, id: PostId) -> Option<FieldMap>;

    /// Definition of field `name` carrying its value for record `id`.
    fn field_definition(&self, name: &str, id: PostId) -> Option<FieldDefinition>;

    /// Metadata lookup.
    ///
    /// With `key == None` returns an object of every key mapped to its list of
    /// values. With a key, returns the list of values, or the first value when
    /// `single` is set (an empty string if the key is absent, an empty list
    /// otherwise).
    fn metadata(&self, meta_type: &str, id: PostId, key: Option<&str>, single: bool) -> Value;

    fn permalink(&self, id: PostId) -> Option<String>;

    /// Flat menu entries assigned to a menu location, `None` when the location
    /// is not registered.
    fn menu_entries(&self, location: &str) -> Option<Vec<MenuEntry>>;

    /// Registered menu location names.
    fn menu_locations(&self) -> Vec<String>;
}
