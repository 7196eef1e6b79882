//! CLI module - Command-line interface for yummy-player
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// yummy-player - episode source resolver and player backend
#[derive(Parser)]
#[command(name = "yummy-player")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    #[command(alias = "web")]
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the quality ladder of one episode as JSON
    #[command(alias = "q")]
    Qualities {
        /// Anime slug
        slug: String,
        /// Zero-based episode index
        #[arg(default_value = "0", allow_hyphen_values = true)]
        index: i64,
    },

    /// Print the full player payload of one episode as JSON
    #[command(alias = "p")]
    PlayerData {
        /// Anime slug
        slug: String,
        /// Zero-based episode index
        #[arg(default_value = "0", allow_hyphen_values = true)]
        index: i64,
    },

    /// Search the catalog
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Create default config file
    Init,
}

pub use commands::*;
