//! Post lookups for template rendering.
//!
//! [`PostHelper`] wraps a [`ContentSource`] and returns records ready to hand to
//! a template: permalink attached, selected metadata attached, and for the
//! field-aware variants the custom fields resolved by [`FieldResolver`].
//!
//! | Operation                      | Fields | Meta | Permalink |
//! |--------------------------------|--------|------|-----------|
//! | [`PostHelper::get_post`]       | -      | yes  | yes       |
//! | [`PostHelper::get_acf_post`]   | yes    | yes  | yes       |
//! | [`PostHelper::get_posts`]      | -      | yes  | yes       |
//! | [`PostHelper::get_acf_posts`]  | yes    | yes  | yes       |
//!
//! # Examples
//!
//! ```rust
//! use dustpress_helper::config::ResolverConfig;
//! use dustpress_helper::models::Post;
//! use dustpress_helper::posts::{PostHelper, PostOptions};
//! use dustpress_helper::source::MemorySource;
//!
//! let mut source = MemorySource::new();
//! source.insert_post(Post::new(1, "page").with_attribute("post_name", "about"));
//!
//! let limits = ResolverConfig::default();
//! let helper = PostHelper::new(&source, &limits);
//! let post = helper.get_post(1, &PostOptions::default()).unwrap();
//! assert_eq!(post.permalink.as_deref(), Some("/about/"));
//! ```

mod meta;
mod options;

pub use meta::attach_meta;
pub use options::{AcfOptions, DEFAULT_META_TYPE, MetaKeys, PostOptions, PostQuery};

use tracing::debug;

use crate::config::ResolverConfig;
use crate::core::{HelperError, PostId};
use crate::fields::FieldResolver;
use crate::models::Post;
use crate::source::ContentSource;

/// Entry point for post lookups.
pub struct PostHelper<'a, S: ContentSource + ?Sized> {
    source: &'a S,
    limits: &'a ResolverConfig,
}

impl<'a, S: ContentSource + ?Sized> PostHelper<'a, S> {
    pub fn new(source: &'a S, limits: &'a ResolverConfig) -> Self {
        Self {
            source,
            limits,
        }
    }

    /// Single record with meta and permalink, `None` if it does not exist.
    pub fn get_post(&self, id: PostId, options: &PostOptions) -> Option<Post> {
        let mut post = self.source.post(id)?;
        attach_meta(self.source, &mut post, options);
        post.permalink = self.source.permalink(id);
        Some(post)
    }

    /// Single record with custom fields, meta and permalink.
    ///
    /// Fails only when relational expansion hits a loop or the depth limit and
    /// the resolver is configured to reject those.
    pub fn get_acf_post(
        &self,
        id: PostId,
        options: &AcfOptions,
    ) -> Result<Option<Post>, HelperError> {
        FieldResolver::new(self.source, options, self.limits).resolve(id)
    }

    /// Every record matching `query`, with meta and permalink.
    pub fn get_posts(&self, query: &PostQuery, options: &PostOptions) -> Vec<Post> {
        let mut posts = self.source.query(query);
        debug!("Query matched {} posts", posts.len());

        for post in &mut posts {
            post.permalink = self.source.permalink(post.id);
            attach_meta(self.source, post, options);
        }
        posts
    }

    /// Every record matching `query`, with custom fields, meta and permalink.
    pub fn get_acf_posts(
        &self,
        query: &PostQuery,
        options: &AcfOptions,
    ) -> Result<Vec<Post>, HelperError> {
        let posts = self.source.query(query);
        debug!("Query matched {} posts", posts.len());

        let resolver = FieldResolver::new(self.source, options, self.limits);
        posts.into_iter().map(|post| resolver.resolve_post(post)).collect()
    }
}
