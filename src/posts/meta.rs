//! Metadata attachment.

use serde_json::Value;

use super::options::{MetaKeys, PostOptions};
use crate::models::{MetaMap, Post};
use crate::source::ContentSource;

/// Attach the metadata selected by `options.meta_keys` to `post.meta`.
///
/// `MetaKeys::None` still sets an empty map so templates can rely on the key.
/// `single` only applies to explicitly listed keys; `All` always returns lists.
pub fn attach_meta<S: ContentSource + ?Sized>(source: &S, post: &mut Post, options: &PostOptions) {
    let meta = match &options.meta_keys {
        MetaKeys::None => MetaMap::new(),
        MetaKeys::All => match source.metadata(&options.meta_type, post.id, None, false) {
            Value::Object(all) => all.into_iter().collect(),
            other => {
                tracing::debug!(
                    "Ignoring non-object metadata for {} {}: {}",
                    options.meta_type,
                    post.id,
                    other
                );
                MetaMap::new()
            }
        },
        MetaKeys::Keys(keys) => keys
            .iter()
            .map(|key| {
                let value =
                    source.metadata(&options.meta_type, post.id, Some(key), options.single);
                (key.clone(), value)
            })
            .collect(),
    };

    post.meta = Some(meta);
}
