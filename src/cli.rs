//! Command-line interface definitions for epaper_links.
//!
//! Global options configure the HTTP client and the source registry and can
//! also be supplied through environment variables.

use crate::resolver::{DEFAULT_CONCURRENCY, DEFAULT_USER_AGENT, MatchMode, ResolverConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for epaper_links.
///
/// # Examples
///
/// ```sh
/// # List the built-in sources
/// epaper_links list
///
/// # Print today's PDF link for The Hindu
/// epaper_links resolve hindu --absolute
///
/// # Resolve every source and keep a dated JSON report
/// epaper_links resolve-all --output-dir ./reports
///
/// # Use a custom catalog
/// EPAPER_REGISTRY=./sources.yaml epaper_links list --json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// YAML file describing the newspaper sources (defaults to the built-in catalog)
    #[arg(long, env = "EPAPER_REGISTRY", global = true)]
    pub registry: Option<PathBuf>,

    /// Landing page request timeout in seconds
    #[arg(
        long,
        env = "EPAPER_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub timeout_secs: u64,

    /// User-Agent header sent to landing pages
    #[arg(long, env = "EPAPER_USER_AGENT", default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Ignore HTTP(S)_PROXY environment variables
    #[arg(long, global = true)]
    pub no_proxy: bool,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every configured source
    List,

    /// Show one source's details
    Show {
        /// Source id, e.g. `hindu`
        id: String,
    },

    /// Resolve the PDF link of one configured source
    Resolve {
        /// Source id, e.g. `hindu`
        id: String,

        #[command(flatten)]
        matching: MatchArgs,
    },

    /// Resolve the PDF link of an arbitrary landing page
    ResolveUrl {
        /// Landing page URL
        url: String,

        #[command(flatten)]
        matching: MatchArgs,
    },

    /// Resolve every configured source concurrently
    ResolveAll {
        /// Number of landing pages fetched at once
        #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Directory for the dated JSON report
        #[arg(short, long, env = "EPAPER_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        matching: MatchArgs,
    },
}

/// Options controlling how a landing page is searched.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct MatchArgs {
    /// Join relative links onto the landing page URL
    #[arg(long)]
    pub absolute: bool,

    /// Also accept `.pdf` links with query strings, links labelled "Download" or "PDF",
    /// PDF iframes and bare PDF URLs in the markup
    #[arg(long)]
    pub lenient: bool,
}

impl Cli {
    /// Build the resolver settings for a resolving command.
    pub fn resolver_config(&self, matching: MatchArgs) -> ResolverConfig {
        ResolverConfig {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            mode: if matching.lenient {
                MatchMode::Lenient
            } else {
                MatchMode::Strict
            },
            absolute: matching.absolute,
            system_proxy: !self.no_proxy,
        }
    }
}
