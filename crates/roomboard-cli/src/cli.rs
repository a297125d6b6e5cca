//! Command-line interface definition.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

/// roomboard - live meeting-room status from CalDAV calendars
#[derive(Debug, Parser)]
#[command(name = "roomboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ROOMBOARD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log format: compact, pretty or json
    #[arg(long, env = "ROOMBOARD_LOG_FORMAT", global = true)]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server in the foreground
    Serve {
        /// Listen address (overrides `server.bind`)
        #[arg(long, env = "ROOMBOARD_BIND")]
        bind: Option<SocketAddr>,

        /// Room registry file (overrides `server.rooms_path`)
        #[arg(long, env = "ROOMBOARD_ROOMS")]
        rooms: Option<PathBuf>,
    },

    /// Show the current occupancy of a registered room
    Check {
        /// Room id as stored in the registry
        room: String,

        /// Room registry file (overrides `server.rooms_path`)
        #[arg(long, env = "ROOMBOARD_ROOMS")]
        rooms: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fetch and resolve a calendar URL directly
    Fetch {
        /// `.ics` feed or CalDAV collection URL
        url: String,

        /// Calendar user name
        #[arg(long, short, env = "ROOMBOARD_USERNAME", default_value = "")]
        username: String,

        /// Calendar password
        #[arg(long, short, env = "ROOMBOARD_PASSWORD", default_value = "", hide_env_values = true)]
        password: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the rooms in the registry
    Rooms {
        /// Room registry file (overrides `server.rooms_path`)
        #[arg(long, env = "ROOMBOARD_ROOMS")]
        rooms: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options shared by the commands that print an occupancy.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Evaluate at this instant (RFC 3339) instead of now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Dump,
    /// Validate the configuration
    Validate,
    /// Show the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve() {
        let cli = Cli::try_parse_from(["roomboard", "serve", "--bind", "127.0.0.1:9000"]).unwrap();
        match cli.command {
            Command::Serve { bind, rooms } => {
                assert_eq!(bind, Some("127.0.0.1:9000".parse().unwrap()));
                assert!(rooms.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_fetch_with_instant() {
        let cli = Cli::try_parse_from([
            "roomboard",
            "--debug",
            "fetch",
            "https://dav.example.com/room.ics",
            "-u",
            "room",
            "--at",
            "2025-02-05T09:30:00Z",
            "--json",
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Command::Fetch {
                url,
                username,
                output,
                ..
            } => {
                assert_eq!(url, "https://dav.example.com/room.ics");
                assert_eq!(username, "room");
                assert_eq!(output.at.map(|t| t.to_rfc3339()).as_deref(), Some("2025-02-05T09:30:00+00:00"));
                assert!(output.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn requires_a_command() {
        assert!(Cli::try_parse_from(["roomboard"]).is_err());
    }
}
