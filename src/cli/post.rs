//! `post` and `posts` commands: print flattened records as JSON.
//!
//! ```bash
//! dph post 12 --recursive --meta all
//! dph posts --post-type event --limit 5 --acf
//! dph posts --include 4,2,9 --meta color,size --single
//! ```

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::common::{CommandContext, OptionArgs, print_json};
use crate::core::{HelperError, PostId};
use crate::posts::{PostHelper, PostQuery};

/// Print one record.
#[derive(Args, Debug)]
pub struct PostCommand {
    /// Post ID
    id: PostId,

    #[command(flatten)]
    options: OptionArgs,
}

impl PostCommand {
    pub async fn execute(self, source: &Path, config: Option<PathBuf>) -> Result<()> {
        let ctx = CommandContext::load(source, config).await?;
        let options = self.options.resolve(&ctx.config.defaults)?;
        let helper = PostHelper::new(&ctx.source, &ctx.config.resolver);

        let post = if self.options.wants_fields(&ctx.config.defaults) {
            helper.get_acf_post(self.id, &options)?
        } else {
            helper.get_post(self.id, &options.post)
        };

        match post {
            Some(post) => print_json(&post),
            None => Err(HelperError::PostNotFound {
                id: self.id,
            }
            .into()),
        }
    }
}

/// Print every record matching a query.
#[derive(Args, Debug)]
pub struct PostsCommand {
    /// Only records of this post type
    #[arg(short = 't', long)]
    post_type: Option<String>,

    /// Only these IDs, in this order
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    include: Vec<PostId>,

    /// Post status to match
    #[arg(long, value_name = "STATUS")]
    status: Option<String>,

    /// Maximum number of records (negative for all)
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    limit: Option<i64>,

    #[command(flatten)]
    options: OptionArgs,
}

impl PostsCommand {
    fn query(&self) -> PostQuery {
        PostQuery {
            post_type: self.post_type.clone(),
            include: self.include.clone(),
            post_status: self.status.clone(),
            limit: self.limit,
        }
    }

    pub async fn execute(self, source: &Path, config: Option<PathBuf>) -> Result<()> {
        let ctx = CommandContext::load(source, config).await?;
        let options = self.options.resolve(&ctx.config.defaults)?;
        let helper = PostHelper::new(&ctx.source, &ctx.config.resolver);
        let query = self.query();

        let posts = if self.options.wants_fields(&ctx.config.defaults) {
            helper.get_acf_posts(&query, &options)?
        } else {
            helper.get_posts(&query, &options.post)
        };

        tracing::info!("Found {} posts", posts.len());
        print_json(&posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        posts: PostsCommand,
    }

    #[test]
    fn test_posts_query_from_flags() {
        let cmd = Wrapper::parse_from(["dph", "--post-type", "event", "--include", "4,2", "-n", "-1"]).posts;
        let query = cmd.query();

        assert_eq!(query.post_type.as_deref(), Some("event"));
        assert_eq!(query.include, vec![4, 2]);
        assert_eq!(query.limit, Some(-1));
        assert_eq!(query.max_results(), None);
        assert_eq!(query.status(), "publish");
    }
}
