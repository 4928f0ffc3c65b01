//! Relational field resolution.
//!
//! [`FieldResolver`] assembles a record with its custom fields, metadata and
//! permalink. Depending on [`AcfOptions`] the field map is:
//!
//! - returned as stored, references staying the objects the source reported
//! - with `whole_fields`, every value replaced by its field definition
//! - with `recursive`, every reference replaced by the referenced record,
//!   assembled with the same options, all the way down
//!
//! `recursive` takes precedence when both flags are set.
//!
//! # Missing and looping references
//!
//! A reference to a record the source cannot supply becomes
//! [`FieldValue::Missing`] in its slot; the rest of the record still resolves.
//!
//! Expansion tracks the chain of records currently being assembled. A reference
//! back onto that chain, or one nested deeper than
//! [`ResolverConfig::max_depth`], is handled by [`ResolverConfig::on_cycle`]:
//! `truncate` leaves the reference unexpanded, `error` aborts the lookup.
//! Records reached through separate branches (A -> B -> D and A -> C -> D) are
//! not loops and are expanded on each branch.

use tracing::{debug, trace, warn};

use super::value::{FieldMap, FieldValue, Reference};
use crate::config::{CyclePolicy, ResolverConfig};
use crate::core::{HelperError, PostId};
use crate::models::Post;
use crate::posts::{AcfOptions, attach_meta};
use crate::source::ContentSource;

/// Assembles field-aware records from a [`ContentSource`].
pub struct FieldResolver<'a, S: ContentSource + ?Sized> {
    source: &'a S,
    options: &'a AcfOptions,
    limits: &'a ResolverConfig,
}

impl<'a, S: ContentSource + ?Sized> FieldResolver<'a, S> {
    pub fn new(source: &'a S, options: &'a AcfOptions, limits: &'a ResolverConfig) -> Self {
        Self {
            source,
            options,
            limits,
        }
    }

    /// Fetch record `id` and assemble it. `Ok(None)` when the source has no
    /// such record.
    pub fn resolve(&self, id: PostId) -> Result<Option<Post>, HelperError> {
        let mut chain = Vec::new();
        self.resolve_in_chain(id, &mut chain)
    }

    /// Assemble a record that was already fetched, e.g. by a query.
    pub fn resolve_post(&self, post: Post) -> Result<Post, HelperError> {
        let mut chain = Vec::new();
        self.assemble(post, &mut chain)
    }

    /// Transform a field map belonging to record `id` according to the options.
    ///
    /// Non-recursive, non-whole-fields calls return the map untouched.
    pub fn resolve_fields(&self, id: PostId, fields: FieldMap) -> Result<FieldMap, HelperError> {
        let mut chain = vec![id];
        self.transform_fields(id, fields, &mut chain)
    }

    fn resolve_in_chain(
        &self,
        id: PostId,
        chain: &mut Vec<PostId>,
    ) -> Result<Option<Post>, HelperError> {
        match self.source.post(id) {
            Some(post) => self.assemble(post, chain).map(Some),
            None => {
                debug!("Post {} not found in content source", id);
                Ok(None)
            }
        }
    }

    fn assemble(&self, mut post: Post, chain: &mut Vec<PostId>) -> Result<Post, HelperError> {
        let fields = self.source.fields(post.id).unwrap_or_default();

        chain.push(post.id);
        let fields = self.transform_fields(post.id, fields, chain);
        chain.pop();

        post.fields = Some(fields?);
        attach_meta(self.source, &mut post, &self.options.post);
        post.permalink = self.source.permalink(post.id);
        Ok(post)
    }

    fn transform_fields(
        &self,
        id: PostId,
        fields: FieldMap,
        chain: &mut Vec<PostId>,
    ) -> Result<FieldMap, HelperError> {
        if self.options.recursive {
            return fields
                .into_iter()
                .map(|(name, value)| Ok((name, self.expand(value, chain)?)))
                .collect();
        }

        if self.options.whole_fields {
            let definitions = fields
                .into_iter()
                .map(|(name, value)| match self.source.field_definition(&name, id) {
                    Some(definition) => (name, FieldValue::Definition(Box::new(definition))),
                    None => {
                        debug!("No definition for field '{}' on post {}", name, id);
                        (name, value)
                    }
                })
                .collect();
            return Ok(definitions);
        }

        Ok(fields)
    }

    fn expand(&self, value: FieldValue, chain: &mut Vec<PostId>) -> Result<FieldValue, HelperError> {
        match value {
            FieldValue::Ref(reference) => self.expand_ref(reference, chain),
            FieldValue::Refs(refs) => refs
                .into_iter()
                .map(|reference| self.expand_ref(reference, chain))
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::Posts),
            FieldValue::Repeater(rows) => rows
                .into_iter()
                .map(|row| self.expand(row, chain))
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::Repeater),
            FieldValue::Group(map) => map
                .into_iter()
                .map(|(name, value)| Ok((name, self.expand(value, chain)?)))
                .collect::<Result<FieldMap, HelperError>>()
                .map(FieldValue::Group),
            other => Ok(other),
        }
    }

    fn expand_ref(
        &self,
        reference: Reference,
        chain: &mut Vec<PostId>,
    ) -> Result<FieldValue, HelperError> {
        let id = reference.id();
        if chain.contains(&id) {
            let mut looped = chain.clone();
            looped.push(id);
            return self.stop_expansion(reference, HelperError::CircularReference {
                chain: looped,
            });
        }

        // The chain holds the requested post plus every expansion above this one.
        if chain.len() > self.limits.max_depth {
            let reason = HelperError::DepthExceeded {
                id,
                max_depth: self.limits.max_depth,
            };
            return self.stop_expansion(reference, reason);
        }

        trace!("Expanding reference to post {} ({})", id, reference.handle.post_type);
        match self.resolve_in_chain(id, chain)? {
            Some(post) => Ok(FieldValue::Post(Box::new(post))),
            None => Ok(FieldValue::Missing),
        }
    }

    fn stop_expansion(
        &self,
        reference: Reference,
        reason: HelperError,
    ) -> Result<FieldValue, HelperError> {
        match self.limits.on_cycle {
            CyclePolicy::Truncate => {
                warn!("{reason}; leaving reference to post {} unexpanded", reference.id());
                Ok(FieldValue::Ref(reference))
            }
            CyclePolicy::Error => Err(reason),
        }
    }
}
