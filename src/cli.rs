//! Command-line interface for baghchal.

use clap::{Parser, Subcommand};

/// Bagh Chal - tigers and goats engine with remote play
#[derive(Parser, Debug)]
#[command(name = "baghchal")]
#[command(about = "Bagh Chal engine and game client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play offline against the built-in tiger opponent
    Play {
        /// Opponent strength (authority-defined)
        #[arg(long, default_value = "2")]
        ai_level: u8,
    },

    /// Play against a remote game authority
    Online {
        /// Authority base URL (e.g. https://host/api)
        #[arg(long)]
        server_url: String,

        /// Player identifier sent to the authority
        #[arg(long, default_value = "player123")]
        player_id: String,

        /// Opponent strength (authority-defined)
        #[arg(long, default_value = "2")]
        ai_level: u8,
    },
}
