//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::TaskFilter;

/// taskdeck - task manager backed by a REST API
#[derive(Parser)]
#[command(
    name = "taskdeck",
    about = "Create, edit, complete, filter, and delete tasks against a REST backend",
    version,
    after_help = "Logs are written to: ~/.local/share/taskdeck/logs/taskdeck.log"
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
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// List tasks
    List {
        /// Which tasks to show
        #[arg(short, long, default_value = "all")]
        filter: TaskFilter,

        /// Output format
        #[arg(short = 'F', long, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// Create the task already completed
        #[arg(long)]
        completed: bool,
    },

    /// Show a single task
    Show {
        /// Task id
        id: i64,

        /// Output format
        #[arg(short = 'F', long, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit a task's fields
    Edit {
        /// Task id
        id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New completion state
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Flip a task's completion state
    Toggle {
        /// Task id
        id: i64,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["taskdeck"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_list_defaults() {
        let cli = Cli::parse_from(["taskdeck", "list"]);
        if let Some(Command::List { filter, format }) = cli.command {
            assert_eq!(filter, TaskFilter::All);
            assert!(matches!(format, OutputFormat::Text));
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_cli_parse_list_with_filter() {
        let cli = Cli::parse_from(["taskdeck", "list", "--filter", "pending"]);
        if let Some(Command::List { filter, .. }) = cli.command {
            assert_eq!(filter, TaskFilter::Pending);
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_cli_parse_add() {
        let cli = Cli::parse_from(["taskdeck", "add", "Buy milk", "--description", "2 liters"]);
        if let Some(Command::Add {
            title,
            description,
            completed,
        }) = cli.command
        {
            assert_eq!(title, "Buy milk");
            assert_eq!(description.as_deref(), Some("2 liters"));
            assert!(!completed);
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_cli_parse_edit() {
        let cli = Cli::parse_from(["taskdeck", "edit", "7", "--completed", "true"]);
        if let Some(Command::Edit {
            id, title, completed, ..
        }) = cli.command
        {
            assert_eq!(id, 7);
            assert!(title.is_none());
            assert_eq!(completed, Some(true));
        } else {
            panic!("Expected Edit command");
        }
    }

    #[test]
    fn test_cli_parse_toggle() {
        let cli = Cli::parse_from(["taskdeck", "toggle", "3"]);
        assert!(matches!(cli.command, Some(Command::Toggle { id: 3 })));
    }

    #[test]
    fn test_cli_parse_rm() {
        let cli = Cli::parse_from(["taskdeck", "rm", "3", "--yes"]);
        assert!(matches!(cli.command, Some(Command::Rm { id: 3, yes: true })));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["taskdeck", "-c", "/path/to/config.yml", "list"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }
}
