//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HitTheRoad - day-by-day travel itinerary planner
#[derive(Parser)]
#[command(
    name = "htr",
    about = "Plan day-by-day travel itineraries against the HitTheRoad service",
    version,
    after_help = "Logs are written to: ~/.local/share/hittheroad/logs/hittheroad.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Register a new account
    Register {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long, default_value = "")]
        nickname: String,

        /// Contact email
        #[arg(short, long, default_value = "")]
        email: String,
    },

    /// Log in and store the session
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// List your schedules
    List {
        /// Only schedules with this completion flag
        #[arg(long)]
        finished: Option<bool>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one schedule
    Show {
        /// Schedule id
        id: i64,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a schedule
    Delete {
        /// Schedule id
        id: i64,
    },

    /// Push a board file to the service (create, or replace with --id)
    Push {
        /// Board file (schedule payload YAML)
        board: PathBuf,

        /// Existing schedule id to replace
        #[arg(long)]
        id: Option<i64>,
    },

    /// Pull a schedule into a board file
    Pull {
        /// Schedule id
        id: i64,

        /// Output board file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Output format for list/show commands
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
