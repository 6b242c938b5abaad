//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Platform-aware app download page
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: appbadge.toml)
    #[arg(short = 'C', long, default_value = "appbadge.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Browser signals supplied by hand instead of by a request
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SignalArgs {
    /// User-Agent string to classify
    #[arg(short, long = "user-agent", default_value = "")]
    pub user_agent: String,

    /// Language tag to classify, e.g. `de-AT`
    #[arg(short, long, default_value = "")]
    pub language: String,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a site directory with a default config and badge assets
    Init {
        /// Site directory to create, relative to `--root`
        name: Option<PathBuf>,
    },

    /// Serve the configured pages
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// Port to listen on (retries the next ports if taken)
        #[arg(short, long)]
        port: Option<u16>,

        /// Minify the html content
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        minify: Option<bool>,
    },

    /// Render one page for the given signals and print it
    Render {
        /// Route to render
        #[arg(long, default_value = "/download")]
        route: String,

        #[command(flatten)]
        signals: SignalArgs,

        /// Render the loading state instead of waiting for the final one
        #[arg(long)]
        loading: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minify the html content
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        minify: Option<bool>,
    },

    /// Print the platform and locale detected for the given signals
    Classify {
        #[command(flatten)]
        signals: SignalArgs,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}
