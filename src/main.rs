//! dph entry point
//!
//! Parses the command line, runs the command and reports failures with
//! suggestions.
//!
//! - `post` - Print one flattened record
//! - `posts` - Print every record matching a query
//! - `menu` - Print a nested menu with the active path marked
//! - `render` - Render a Tera template against content

use anyhow::Result;
use clap::Parser;
use dustpress_helper::cli;
use dustpress_helper::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
