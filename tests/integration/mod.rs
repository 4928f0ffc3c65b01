//! Integration test suite for dph
//!
//! End-to-end tests that run the `dph` binary against content files written
//! to a temporary directory.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **common**: Test site fixture and command helpers
//! - **errors**: Error reporting and exit codes
//! - **menu**: Menu command output and active-path marking
//! - **post**: `post` and `posts` commands, field resolution, metadata
//! - **render**: Template rendering

mod common;

mod errors;
mod menu;
mod post;
mod render;
