use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ecf-report")]
#[command(
    author,
    version,
    about = "Reads enterprise custom field definitions and values from a PWA site and renders a report"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// PWA site URL, e.g. https://contoso.sharepoint.com/sites/pwa
    #[arg(long, global = true, env = "ECF_SITE_URL")]
    pub site_url: Option<String>,

    /// Bearer token of an already authenticated session
    #[arg(long, global = true, env = "ECF_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Path to config file (defaults to .ecf.yml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (DEBUG) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write structured logs to this file in addition to stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the full report: field catalog plus every project's field values
    Report {
        /// Projects per remote query
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// Render only the custom field catalog
    Catalog,
}
