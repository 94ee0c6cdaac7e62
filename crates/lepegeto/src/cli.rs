//! Command-line interface for lepegeto.

use clap::{Parser, Subcommand};

/// Lepegeto - two-player stepping game for the terminal
#[derive(Parser, Debug)]
#[command(name = "lepegeto")]
#[command(about = "Move two pieces at once, reach the far row first", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "lepegeto.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game at the console
    Play {
        /// Name of the Blue player (moves first)
        #[arg(long)]
        blue: Option<String>,

        /// Name of the Red player
        #[arg(long)]
        red: Option<String>,

        /// Results database (overrides the config file)
        #[arg(long)]
        db_path: Option<String>,

        /// Do not record results
        #[arg(long)]
        no_record: bool,

        /// Resume a saved game
        #[arg(long)]
        load: Option<std::path::PathBuf>,
    },

    /// Show recorded results, fastest win first
    Scores {
        /// Results database (overrides the config file)
        #[arg(long)]
        db_path: Option<String>,

        /// Only games this player took part in
        #[arg(long)]
        player: Option<String>,

        /// Maximum rows to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}
