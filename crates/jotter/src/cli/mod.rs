//! Command-line interface for jotter.
//!
//! This module provides the CLI structure and command handlers for the
//! `jot` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, DeleteCommand, ListCommand, NewCommand, OutputFormat, RecordCommand,
    SearchCommand, StatusCommand,
};

/// jot - capture short notes, typed or spoken
///
/// A local-first note tool: notes live on this device only, persisted in
/// a single local database, searchable as you type them back.
#[derive(Debug, Parser)]
#[command(name = "jot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a note from typed content
    New(NewCommand),

    /// List notes, newest first
    List(ListCommand),

    /// Search notes by content
    Search(SearchCommand),

    /// Delete a note by identifier
    Delete(DeleteCommand),

    /// Record a voice note (requires a speech-to-text engine)
    Record(RecordCommand),

    /// Show collection and capability status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "jot");
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: true,
            command: Command::Status(StatusCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_levels() {
        for (flags, expected) in [
            (0, crate::logging::Verbosity::Normal),
            (1, crate::logging::Verbosity::Verbose),
            (2, crate::logging::Verbosity::Trace),
        ] {
            let cli = Cli {
                config: None,
                verbose: flags,
                quiet: false,
                command: Command::Status(StatusCommand { json: false }),
            };
            assert_eq!(cli.verbosity(), expected);
        }
    }

    #[test]
    fn test_parse_new_with_content() {
        let cli = Cli::try_parse_from(["jot", "new", "Buy milk"]).unwrap();
        match cli.command {
            Command::New(cmd) => assert_eq!(cmd.content.as_deref(), Some("Buy milk")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_new_without_content() {
        let cli = Cli::try_parse_from(["jot", "new"]).unwrap();
        assert!(matches!(cli.command, Command::New(NewCommand { content: None })));
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["jot", "list"]).unwrap();
        match cli.command {
            Command::List(cmd) => {
                assert_eq!(cmd.limit, 0);
                assert_eq!(cmd.format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["jot", "search", "milk", "--format", "json"]).unwrap();
        match cli.command {
            Command::Search(cmd) => {
                assert_eq!(cmd.query, "milk");
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["jot", "delete", "abc-123"]).unwrap();
        match cli.command {
            Command::Delete(cmd) => assert_eq!(cmd.id, "abc-123"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_record() {
        let cli = Cli::try_parse_from(["jot", "record", "--language", "en-US"]).unwrap();
        match cli.command {
            Command::Record(cmd) => assert_eq!(cmd.language.as_deref(), Some("en-US")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["jot", "-c", "/custom/config.toml", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_subcommands() {
        let cli = Cli::try_parse_from(["jot", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));

        let cli = Cli::try_parse_from(["jot", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }
}
