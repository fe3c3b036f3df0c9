//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::context::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hash-based navigation client for a static blog
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Base URL of the content server (e.g. https://example.com)
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Read content from a local build directory instead of over HTTP
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Path prefix in front of every resource (e.g. /webpage)
    #[arg(short, long, global = true)]
    pub prefix: Option<String>,

    /// Config file name (default: hashnav.toml)
    #[arg(short = 'C', long, default_value = "hashnav.toml", global = true)]
    pub config: PathBuf,

    /// Print debug detail (cache hits, context probing, loads)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the route, resource and context a hash resolves to (no network)
    Resolve {
        /// location hash, e.g. '#post/20240101_title' (the leading # is optional)
        hash: String,
    },

    /// Navigate to a hash once and print the resulting state
    Visit {
        /// location hash to open
        hash: String,
    },

    /// List the posts of a context
    Posts {
        /// all, project, paper, pennings, blog or haikuesque
        #[arg(default_value = "all")]
        context: Context,
    },

    /// Browse interactively: ←/→ previous/next, b/f back/forward, h home, q quit
    Browse {
        /// starting hash (default: #home)
        hash: Option<String>,
    },
}

impl Cli {
    /// Whether the command needs a content source at all.
    pub const fn needs_source(&self) -> bool {
        !matches!(self.command, Commands::Resolve { .. })
    }
}

/// Accept hashes with or without the leading `#`.
pub fn normalize_hash(hash: &str) -> String {
    let hash = hash.trim();
    if hash.is_empty() || hash.starts_with('#') {
        hash.to_owned()
    } else {
        format!("#{hash}")
    }
}
