//! dustpress-helper - flatten CMS content for templates
//!
//! Turns posts, their custom fields and navigation menus into plain data a
//! template can consume directly:
//!
//! - **Relational field resolution**: custom fields that reference other
//!   records are replaced by those records, recursively, with loop and depth
//!   protection
//! - **Menu trees**: a flat list of menu entries becomes a nested tree with
//!   the entry for the current object and all of its ancestors marked
//! - **Post lookups**: records with permalink and selected metadata attached
//!
//! All content comes through the [`source::ContentSource`] trait. The bundled
//! [`source::MemorySource`] reads a JSON or TOML content file.
//!
//! # Architecture
//!
//! - [`core`] - Error types and shared identifiers
//! - [`config`] - Configuration file (option defaults, resolver limits, menu classes)
//! - [`models`] - Post records
//! - [`fields`] - Field values and the relational resolver
//! - [`posts`] - Post lookups and per-call options
//! - [`menu`] - Menu entries and the tree builder
//! - [`source`] - Content source trait and in-memory implementation
//! - [`templating`] - Tera rendering of flattened content
//! - [`cli`] - The `dph` command line
//!
//! # Example
//!
//! ```rust
//! use dustpress_helper::config::HelperConfig;
//! use dustpress_helper::menu::{CurrentContext, MenuEntry, menu_as_items};
//! use dustpress_helper::source::MemorySource;
//!
//! let mut source = MemorySource::new();
//! source.insert_menu("primary", vec![
//!     MenuEntry::new(1, 0, 10, "page").with_title("Home"),
//!     MenuEntry::new(2, 1, 11, "page").with_title("About"),
//! ]);
//!
//! let config = HelperConfig::default();
//! let items = menu_as_items(&source, "primary", 0, None, &CurrentContext::for_post(11), &config.menu);
//!
//! assert!(items[0].has_class("current-menu-parent"));
//! assert!(items[0].submenu[0].has_class("current-menu-item"));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod fields;
pub mod menu;
pub mod models;
pub mod posts;
pub mod source;
pub mod templating;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
