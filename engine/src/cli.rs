//! CLI interface for Sara
//!
//! Defines the commands and global flags using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sara, a single-turn conversational responder
///
/// Answers over HTTP or from the command line, backed by a language model
/// and web search.
#[derive(Parser, Debug)]
#[command(name = "sara")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP endpoint
    Serve {
        /// Address to bind (overrides [server] host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides [server] port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer one utterance and exit
    Ask {
        /// What to say to Sara
        text: String,
    },

    /// Validate configuration and check external services
    Doctor,
}
