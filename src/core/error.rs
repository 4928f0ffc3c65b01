//! Error handling for dustpress-helper
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`HelperError`]) for the failures callers may want
//!    to match on
//! 2. **User-friendly messages** ([`ErrorContext`]) with suggestions for CLI users
//!
//! Most of the helper is best-effort: a missing relational reference, an
//! unregistered menu location or a malformed repeater are recovered locally and
//! surface as empty values. The variants below are the failures that cannot be
//! degraded that way, such as an unreadable content file or a circular reference
//! when the resolver is configured to reject cycles.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dustpress_helper::core::{HelperError, user_friendly_error};
//!
//! let err = anyhow::Error::from(HelperError::PostNotFound { id: 42 });
//! let ctx = user_friendly_error(err);
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::core::PostId;

/// The main error type for dustpress-helper operations.
#[derive(Error, Debug)]
pub enum HelperError {
    /// The content source file does not exist
    #[error("Content source not found: {path}")]
    SourceNotFound {
        path: String,
    },

    /// The content source file exists but could not be parsed
    #[error("Invalid content source {path}: {reason}")]
    SourceParseError {
        path: String,
        reason: String,
    },

    /// Configuration file problems
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// A top-level post lookup found nothing.
    ///
    /// Relational references never produce this; they resolve to an empty slot.
    #[error("Post {id} not found")]
    PostNotFound {
        id: PostId,
    },

    /// The requested menu location has no registered menu
    #[error("Menu location '{location}' is not registered")]
    MenuNotFound {
        location: String,
        available: Vec<String>,
    },

    /// Relational fields reference each other in a loop
    #[error("Circular relational reference: {}", format_chain(.chain))]
    CircularReference {
        chain: Vec<PostId>,
    },

    /// Relational expansion went deeper than the configured limit
    #[error("Relational expansion exceeded maximum depth of {max_depth} at post {id}")]
    DepthExceeded {
        id: PostId,
        max_depth: usize,
    },

    /// Template rendering failed
    #[error("Template error: {message}")]
    Template {
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

fn format_chain(chain: &[PostId]) -> String {
    chain.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> ")
}

/// Error wrapper with user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: HelperError,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Extra explanation of the failure
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: HelperError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colored labels.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with suggestions.
///
/// Known [`HelperError`] variants anywhere in the `anyhow` chain get tailored
/// advice. Everything else is reported as-is with the full cause chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(helper_error) = cause.downcast_ref::<HelperError>() {
            return create_error_context(helper_error);
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(HelperError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of your configuration file");
    }

    let details = error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>().join(": ");
    let ctx = ErrorContext::new(HelperError::ConfigError {
        message: error.to_string(),
    });
    if details.is_empty() {
        ctx
    } else {
        ctx.with_details(details)
    }
}

fn create_error_context(error: &HelperError) -> ErrorContext {
    match error {
        HelperError::SourceNotFound {
            path,
        } => ErrorContext::new(HelperError::SourceNotFound {
            path: path.clone(),
        })
        .with_suggestion("Pass an existing JSON or TOML content file with --source")
        .with_details("The content source holds the posts, fields and menus to flatten"),

        HelperError::SourceParseError {
            path,
            reason,
        } => ErrorContext::new(HelperError::SourceParseError {
            path: path.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Content files need top-level `posts` and optionally `menus`, `field_definitions` and `object_meta`"),

        HelperError::PostNotFound {
            id,
        } => ErrorContext::new(HelperError::PostNotFound {
            id: *id,
        })
        .with_suggestion("Check the post ID against the content source"),

        HelperError::MenuNotFound {
            location,
            available,
        } => {
            let ctx = ErrorContext::new(HelperError::MenuNotFound {
                location: location.clone(),
                available: available.clone(),
            });
            match closest_match(location, available) {
                Some(candidate) => ctx.with_suggestion(format!("Did you mean '{candidate}'?")),
                None if available.is_empty() => {
                    ctx.with_details("The content source registers no menu locations")
                }
                None => ctx.with_details(format!("Registered locations: {}", available.join(", "))),
            }
        }

        HelperError::CircularReference {
            chain,
        } => ErrorContext::new(HelperError::CircularReference {
            chain: chain.clone(),
        })
        .with_suggestion("Set `on_cycle = \"truncate\"` under [resolver] to leave looping references unexpanded")
        .with_details("Posts whose relational fields point back to an ancestor cannot be expanded recursively"),

        HelperError::DepthExceeded {
            id,
            max_depth,
        } => ErrorContext::new(HelperError::DepthExceeded {
            id: *id,
            max_depth: *max_depth,
        })
        .with_suggestion("Raise `max_depth` under [resolver] or disable recursive expansion"),

        HelperError::ConfigError {
            message,
        } => ErrorContext::new(HelperError::ConfigError {
            message: message.clone(),
        }),

        HelperError::Template {
            message,
        } => ErrorContext::new(HelperError::Template {
            message: message.clone(),
        })
        .with_suggestion("Check variable names against the context: `post`, `posts`, `menu` and custom variables"),

        HelperError::IoError(e) => ErrorContext::new(HelperError::ConfigError {
            message: format!("IO error: {e}"),
        }),

        HelperError::JsonError(e) => ErrorContext::new(HelperError::ConfigError {
            message: format!("JSON error: {e}"),
        }),

        HelperError::TomlError(e) => ErrorContext::new(HelperError::ConfigError {
            message: format!("TOML error: {e}"),
        }),
    }
}

/// Closest registered name by Jaro-Winkler similarity, if reasonably close.
fn closest_match<'a>(needle: &str, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (c.as_str(), strsim::jaro_winkler(needle, c)))
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}
