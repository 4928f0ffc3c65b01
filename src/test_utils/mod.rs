//! Test utilities for dustpress-helper
//!
//! Helpers for unit and integration tests: a builder for in-memory content
//! sources and one-time logging setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use dustpress_helper::test_utils::SourceBuilder;
//! use serde_json::json;
//!
//! let source = SourceBuilder::new()
//!     .post(1, "page", json!({ "child": { "ID": 2, "post_type": "post" } }))
//!     .post(2, "post", json!({}))
//!     .build();
//! ```

pub mod builder;

pub use builder::SourceBuilder;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise
/// `RUST_LOG` when set, otherwise stays silent.
///
/// ```bash
/// RUST_LOG=dustpress_helper=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
