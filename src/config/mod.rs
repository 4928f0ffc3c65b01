//! Configuration management.
//!
//! A single optional TOML file tunes the helper: option defaults for post
//! lookups, limits for relational expansion, and menu class names. See
//! [`global`] for the file format and location rules.

mod global;

pub use global::{
    CONFIG_ENV_VAR, CyclePolicy, DEFAULT_MAX_DEPTH, HelperConfig, MenuConfig, ResolverConfig,
};
