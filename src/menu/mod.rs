//! Navigation menus as nested, template-ready lists.
//!
//! Menus come from the content source as flat entry lists. [`MenuTreeBuilder`]
//! nests them and tags each entry with CSS classes:
//!
//! - `menu-item` and `menu-item-<object id>` on every entry
//! - `menu-item-has-children` on entries with a submenu
//! - `current-menu-item` on the entry for the page being viewed
//! - `current-menu-parent` on each of its ancestors
//!
//! The class names are configurable through [`MenuConfig`].
//!
//! # Examples
//!
//! ```rust
//! use dustpress_helper::config::MenuConfig;
//! use dustpress_helper::menu::{CurrentContext, MenuEntry, MenuTreeBuilder};
//!
//! let entries = vec![
//!     MenuEntry::new(1, 0, 10, "page"),
//!     MenuEntry::new(2, 1, 11, "page"),
//! ];
//! let ctx = CurrentContext::for_post(11);
//! let classes = MenuConfig::default();
//!
//! let menu = MenuTreeBuilder::new(&entries, &ctx, &classes).build(0, None);
//! assert!(menu[0].has_class("current-menu-parent"));
//! assert!(menu[0].submenu[0].has_class("current-menu-item"));
//! ```

mod builder;
mod entry;

pub use builder::MenuTreeBuilder;
pub use entry::{CurrentContext, CurrentTerm, MenuEntry};

use tracing::debug;

use crate::config::MenuConfig;
use crate::core::PostId;
use crate::source::ContentSource;

/// Nested menu for a registered menu location.
///
/// `parent` narrows the result to the submenu below the entry linking to that
/// object (`0` for the whole menu). `override_id` marks a different object as
/// current than the one in `context`. An unregistered location or an empty
/// menu yields an empty list.
pub fn menu_as_items<S: ContentSource + ?Sized>(
    source: &S,
    location: &str,
    parent: PostId,
    override_id: Option<PostId>,
    context: &CurrentContext,
    classes: &MenuConfig,
) -> Vec<MenuEntry> {
    let Some(entries) = source.menu_entries(location) else {
        debug!("No menu registered for location '{}'", location);
        return Vec::new();
    };

    if entries.is_empty() {
        return Vec::new();
    }

    let context = match override_id {
        Some(id) => context.clone().with_override(Some(id)),
        None => context.clone(),
    };
    MenuTreeBuilder::new(&entries, &context, classes).build(parent, None)
}
