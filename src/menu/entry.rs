//! Menu entries and the "currently viewed" context.

use serde::{Deserialize, Serialize};

use crate::core::{MenuItemId, PostId};

/// One navigation menu entry.
///
/// Entries arrive flat from the content source. The builder returns new
/// entries with `classes` and `submenu` filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Menu-entry identity
    #[serde(rename = "ID")]
    pub id: MenuItemId,

    /// Menu-entry identity of the parent, `0` at the top level
    #[serde(rename = "menu_item_parent", default)]
    pub parent_id: MenuItemId,

    /// Identity of the linked content object
    pub object_id: PostId,

    /// Type of the linked object: a post type or a taxonomy name
    #[serde(rename = "object")]
    pub object_type: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub classes: Vec<String>,

    #[serde(rename = "Submenu", default)]
    pub submenu: Vec<MenuEntry>,
}

impl MenuEntry {
    pub fn new(
        id: MenuItemId,
        parent_id: MenuItemId,
        object_id: PostId,
        object_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            parent_id,
            object_id,
            object_type: object_type.into(),
            title: String::new(),
            url: String::new(),
            classes: Vec::new(),
            submenu: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Number of entries in this subtree, this one included.
    pub fn count(&self) -> usize {
        1 + self.submenu.iter().map(MenuEntry::count).sum::<usize>()
    }
}

/// Taxonomy term being viewed, e.g. a category archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentTerm {
    pub id: PostId,
    pub taxonomy: String,
}

/// What the visitor is currently looking at.
///
/// Passed explicitly to the builder in place of ambient request state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentContext {
    /// Content record being viewed
    pub post_id: Option<PostId>,
    /// Term archive being viewed
    pub term: Option<CurrentTerm>,
    /// Object to treat as current instead of `post_id`
    pub override_id: Option<PostId>,
}

impl CurrentContext {
    pub fn for_post(id: PostId) -> Self {
        Self {
            post_id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_term(mut self, id: PostId, taxonomy: impl Into<String>) -> Self {
        self.term = Some(CurrentTerm {
            id,
            taxonomy: taxonomy.into(),
        });
        self
    }

    #[must_use]
    pub fn with_override(mut self, id: Option<PostId>) -> Self {
        self.override_id = id;
        self
    }

    /// Whether `entry` links to the current object.
    ///
    /// The override replaces the viewed post when set. A term matches only
    /// entries of its own taxonomy.
    pub fn is_current(&self, entry: &MenuEntry) -> bool {
        let current_post = self.override_id.or(self.post_id);
        let post_match = current_post == Some(entry.object_id);
        let term_match = self
            .term
            .as_ref()
            .is_some_and(|t| t.id == entry.object_id && t.taxonomy == entry.object_type);
        post_match || term_match
    }
}
