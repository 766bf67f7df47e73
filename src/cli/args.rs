//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ClipMiner - capture audio clips from media playback and mine flashcards
#[derive(Parser, Debug)]
#[command(name = "clip-miner")]
#[command(version)]
#[command(about = "Capture audio clips from media playback and publish study flashcards")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe or drive the native capture host
    Host {
        #[command(subcommand)]
        action: HostAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Inspect the capture history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

/// Native capture host actions
#[derive(Subcommand, Debug)]
pub enum HostAction {
    /// Check that the capture host is installed and answering
    Ping,
    /// Record a clip of fixed duration through the capture host
    Record {
        /// Recording duration (e.g., 5s, 1m, 1m30s)
        #[arg(short = 'd', long, value_name = "TIME", default_value = "5s")]
        duration: String,

        /// Ask the host to encode the clip as MP3
        #[arg(long)]
        mp3: bool,

        /// File to write the decoded clip to
        #[arg(short = 'o', long, value_name = "PATH", default_value = "clip.wav")]
        output: PathBuf,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// History action subcommands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum HistoryAction {
    /// List saved captures
    List,
    /// Delete all saved captures
    Clear,
    /// Show history file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "anki_url",
    "deck",
    "note_type",
    "sentence_field",
    "audio_field",
    "tags",
    "history_limit",
    "host_socket",
    "notify",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_host_ping() {
        let cli = Cli::parse_from(["clip-miner", "host", "ping"]);
        assert!(matches!(
            cli.command,
            Commands::Host {
                action: HostAction::Ping
            }
        ));
    }

    #[test]
    fn cli_parses_host_record_defaults() {
        let cli = Cli::parse_from(["clip-miner", "host", "record"]);
        if let Commands::Host {
            action:
                HostAction::Record {
                    duration,
                    mp3,
                    output,
                },
        } = cli.command
        {
            assert_eq!(duration, "5s");
            assert!(!mp3);
            assert_eq!(output, PathBuf::from("clip.wav"));
        } else {
            panic!("Expected Host Record command");
        }
    }

    #[test]
    fn cli_parses_host_record_options() {
        let cli = Cli::parse_from([
            "clip-miner", "host", "record", "-d", "10s", "--mp3", "-o", "out.mp3",
        ]);
        if let Commands::Host {
            action:
                HostAction::Record {
                    duration,
                    mp3,
                    output,
                },
        } = cli.command
        {
            assert_eq!(duration, "10s");
            assert!(mp3);
            assert_eq!(output, PathBuf::from("out.mp3"));
        } else {
            panic!("Expected Host Record command");
        }
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["clip-miner", "config", "set", "deck", "Japanese"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "deck");
            assert_eq!(value, "Japanese");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_history_clear() {
        let cli = Cli::parse_from(["clip-miner", "history", "clear"]);
        assert!(matches!(
            cli.command,
            Commands::History {
                action: HistoryAction::Clear
            }
        ));
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("deck"));
        assert!(is_valid_config_key("anki_url"));
        assert!(is_valid_config_key("host_socket"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
