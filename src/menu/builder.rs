//! Nested menu construction with active-path marking.
//!
//! # Anchors
//!
//! Each level is built below an *anchor*: a content object id plus type. The
//! anchor is resolved to the first entry linking to that object, and the level
//! consists of every entry whose `parent_id` is that entry's menu id, in input
//! order. An anchor that matches nothing resolves to the top level (`0`).
//! Children are then built with their own `(object_id, object_type)` as anchor.
//!
//! Since anchors go through the linked object, entries that link to the same
//! object all get the submenu of the first such entry. Children parented to a
//! later duplicate are not reachable.
//!
//! # Active path
//!
//! An entry linking to the current object gets the current-item class. Every
//! ancestor of such an entry gets the current-parent class. The "something
//! below is active" signal travels up as a flag on each built level and is
//! dropped by [`MenuTreeBuilder::build`], so it never appears in the output.

use tracing::warn;

use super::entry::{CurrentContext, MenuEntry};
use crate::config::MenuConfig;
use crate::core::{MenuItemId, PostId, TOP_LEVEL};

/// Builds nested menus from a flat entry list.
pub struct MenuTreeBuilder<'a> {
    entries: &'a [MenuEntry],
    context: &'a CurrentContext,
    classes: &'a MenuConfig,
}

/// Entries of one level and whether any of them is on the active path.
#[derive(Debug, Default)]
struct Level {
    items: Vec<MenuEntry>,
    active: bool,
}

impl<'a> MenuTreeBuilder<'a> {
    pub fn new(
        entries: &'a [MenuEntry],
        context: &'a CurrentContext,
        classes: &'a MenuConfig,
    ) -> Self {
        Self {
            entries,
            context,
            classes,
        }
    }

    /// Build the forest below `anchor`.
    ///
    /// `anchor_type` of `None` matches an entry of any object type. Pass
    /// `anchor = 0` for the whole menu.
    pub fn build(&self, anchor: PostId, anchor_type: Option<&str>) -> Vec<MenuEntry> {
        let mut ancestors = Vec::new();
        self.build_level(anchor, anchor_type, &mut ancestors).items
    }

    fn resolve_anchor(&self, anchor: PostId, anchor_type: Option<&str>) -> MenuItemId {
        if anchor == TOP_LEVEL {
            return TOP_LEVEL;
        }
        self.entries
            .iter()
            .find(|e| e.object_id == anchor && anchor_type.is_none_or(|t| e.object_type == t))
            .map_or(TOP_LEVEL, |e| e.id)
    }

    fn build_level(
        &self,
        anchor: PostId,
        anchor_type: Option<&str>,
        ancestors: &mut Vec<MenuItemId>,
    ) -> Level {
        let parent_id = self.resolve_anchor(anchor, anchor_type);

        // Duplicate links can make an anchor resolve back onto an ancestor.
        if ancestors.contains(&parent_id) {
            warn!(
                "Menu entry {} loops back onto its ancestors; submenu skipped",
                parent_id
            );
            return Level::default();
        }

        ancestors.push(parent_id);
        let mut level = Level::default();
        for entry in self.entries.iter().filter(|e| e.parent_id == parent_id) {
            let (node, active) = self.build_node(entry, ancestors);
            level.active |= active;
            level.items.push(node);
        }
        ancestors.pop();

        level
    }

    fn build_node(&self, entry: &MenuEntry, ancestors: &mut Vec<MenuItemId>) -> (MenuEntry, bool) {
        let submenu = self.build_level(entry.object_id, Some(&entry.object_type), ancestors);
        let is_current = self.context.is_current(entry);

        let mut extra = Vec::new();
        if !submenu.items.is_empty() {
            extra.push(self.classes.has_children_class.clone());
        }
        if submenu.active {
            extra.push(self.classes.current_parent_class.clone());
        }
        if is_current {
            extra.push(self.classes.current_item_class.clone());
        }

        let node = MenuEntry {
            id: entry.id,
            parent_id: entry.parent_id,
            object_id: entry.object_id,
            object_type: entry.object_type.clone(),
            title: entry.title.clone(),
            url: entry.url.clone(),
            classes: self.classes_for(entry, extra),
            submenu: submenu.items,
        };

        (node, submenu.active || is_current)
    }

    /// Existing classes plus state classes, cleaned, then the two item classes.
    fn classes_for(&self, entry: &MenuEntry, extra: Vec<String>) -> Vec<String> {
        let item_class = &self.classes.item_class;
        let identity_class = format!("{item_class}-{}", entry.object_id);

        let mut classes: Vec<String> = Vec::new();
        for class in entry.classes.iter().cloned().chain(extra) {
            let class = class.trim().to_string();
            if class.is_empty()
                || class == *item_class
                || class == identity_class
                || classes.contains(&class)
            {
                continue;
            }
            classes.push(class);
        }

        classes.push(item_class.clone());
        classes.push(identity_class);
        classes
    }
}
