//! Core types and error handling shared across the helper.
//!
//! # Identities
//!
//! Content records and menu entries live in different id spaces even though both
//! are plain integers. A menu entry carries its own [`MenuItemId`] and refers to
//! the content it links to through a [`PostId`] plus an object type tag, so the
//! two aliases are kept apart in signatures to make that indirection visible.

pub mod error;

pub use error::{ErrorContext, HelperError, user_friendly_error};

/// Identity of a content record (post, page, term, ...).
pub type PostId = u64;

/// Identity of a navigation menu entry. `0` means "top level".
pub type MenuItemId = u64;

/// Parent id used by menu entries that sit at the top of the menu.
pub const TOP_LEVEL: MenuItemId = 0;
