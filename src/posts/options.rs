//! Per-call options for post lookups.
//!
//! Options are plain serde structs so that configured defaults and per-call
//! arguments can be merged as JSON objects: the caller's arguments win, absent
//! (`null`) arguments fall back to the defaults.

use anyhow::{Context, Result};
use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

use crate::core::PostId;
use crate::utils::deep_merge_json;

/// Default metadata namespace.
pub const DEFAULT_META_TYPE: &str = "post";

/// Which metadata keys to attach to a post.
///
/// Serialized as the string `"all"` or a list of key names; `None` is the
/// empty list. `null` and `[]` both read back as `None`, so an explicit
/// empty list still overrides a configured default when options are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MetaKeys {
    /// Attach an empty meta map
    #[default]
    None,
    /// Attach every key the source has
    All,
    /// Attach only the listed keys
    Keys(Vec<String>),
}

impl Serialize for MetaKeys {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_seq(Some(0))?.end(),
            Self::All => serializer.serialize_str("all"),
            Self::Keys(keys) => keys.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MetaKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Word(String),
            Keys(Vec<String>),
        }

        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(Self::None),
            Some(Repr::Word(word)) if word == "all" => Ok(Self::All),
            Some(Repr::Word(word)) if word.is_empty() => {
                Err(D::Error::custom("meta key name cannot be empty"))
            }
            Some(Repr::Word(word)) => Ok(Self::Keys(vec![word])),
            Some(Repr::Keys(keys)) if keys.is_empty() => Ok(Self::None),
            Some(Repr::Keys(keys)) => Ok(Self::Keys(keys)),
        }
    }
}

impl FromStr for MetaKeys {
    type Err = std::convert::Infallible;

    /// Parses `all`, an empty string (no meta), or a comma separated key list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "" => Self::None,
            "all" => Self::All,
            list => Self::Keys(
                list.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(String::from)
                    .collect(),
            ),
        })
    }
}

/// Options shared by every post lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOptions {
    #[serde(default)]
    pub meta_keys: MetaKeys,
    /// Return only the first value of each selected meta key
    #[serde(default)]
    pub single: bool,
    #[serde(default = "default_meta_type")]
    pub meta_type: String,
}

impl Default for PostOptions {
    fn default() -> Self {
        Self {
            meta_keys: MetaKeys::None,
            single: false,
            meta_type: default_meta_type(),
        }
    }
}

fn default_meta_type() -> String {
    DEFAULT_META_TYPE.to_string()
}

/// Options for custom-field aware lookups.
///
/// `whole_fields` and `recursive` select mutually exclusive expansions. When
/// both are set, recursive relational expansion wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcfOptions {
    #[serde(flatten)]
    pub post: PostOptions,
    /// Replace every field value with its full field definition
    #[serde(default)]
    pub whole_fields: bool,
    /// Replace record references with fully resolved records
    #[serde(default)]
    pub recursive: bool,
}

impl AcfOptions {
    /// Merge per-call arguments over these defaults.
    ///
    /// `args` is a JSON object using the serialized option names
    /// (`meta_keys`, `single`, `meta_type`, `whole_fields`, `recursive`).
    /// Unknown keys are ignored and `null` values keep the default.
    pub fn merged(&self, args: &Value) -> Result<Self> {
        let base = serde_json::to_value(self).context("Failed to serialize option defaults")?;
        serde_json::from_value(deep_merge_json(base, args)).context("Invalid post options")
    }
}

/// Record query understood by content sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostQuery {
    /// Restrict to one post type
    #[serde(default)]
    pub post_type: Option<String>,
    /// Restrict to these ids, returned in this order
    #[serde(default)]
    pub include: Vec<PostId>,
    /// Defaults to `publish`
    #[serde(default)]
    pub post_status: Option<String>,
    /// Maximum number of posts; `None` or negative means all
    #[serde(default, rename = "posts_per_page")]
    pub limit: Option<i64>,
}

impl PostQuery {
    pub const DEFAULT_STATUS: &'static str = "publish";

    pub fn status(&self) -> &str {
        self.post_status.as_deref().unwrap_or(Self::DEFAULT_STATUS)
    }

    /// Effective limit, `None` meaning unbounded.
    pub fn max_results(&self) -> Option<usize> {
        self.limit.and_then(|n| usize::try_from(n).ok())
    }
}
