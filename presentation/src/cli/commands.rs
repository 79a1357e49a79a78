//! CLI command definitions

use clap::{Parser, ValueEnum};
use crew_domain::{OutputFormat, TeamMode};
use std::path::PathBuf;

/// Output format for team runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Only the final answer
    Answer,
    /// Final answer plus member responses and conflict verdict
    Full,
    /// The whole run as JSON
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Answer => OutputFormat::Answer,
            OutputFormatArg::Full => OutputFormat::Full,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for crew
#[derive(Parser, Debug)]
#[command(name = "crew")]
#[command(author, version, about = "Run a team of language models behind one leader")]
#[command(long_about = r#"
crew sends a request to a team of members and returns one answer.

Modes:
  route        The leader picks one member, whose answer is returned as-is
  coordinate   The leader plans, members contribute, the leader synthesizes
  collaborate  Every member answers; contradictions are detected and resolved

Configuration files are loaded from (in priority order):
1. --config <path>           Explicit config file
2. ./crew.toml               Project-level config
3. ~/.config/crew/config.toml  Global config

Example:
  crew "Summarize the trade-offs of event sourcing"
  crew --mode collaborate --async "When was the Eiffel Tower finished?"
  crew --chat --session design-review
"#)]
pub struct Cli {
    /// The request to send to the team (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Stream the final answer in chunks
    #[arg(short, long)]
    pub stream: bool,

    /// Collaboration mode (route, coordinate, collaborate)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<TeamMode>,

    /// Invoke members concurrently
    #[arg(long = "async")]
    pub concurrent: bool,

    /// Session id to load and persist history under
    #[arg(long, value_name = "ID")]
    pub session: Option<String>,

    /// User id the session belongs to
    #[arg(long, value_name = "ID")]
    pub user: Option<String>,

    /// Include failed members as diagnostics in leader prompts
    #[arg(long)]
    pub debug: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_with_flags() {
        let cli = Cli::parse_from([
            "crew",
            "--mode",
            "collaborate",
            "--async",
            "-o",
            "json",
            "-vv",
            "What now?",
        ]);
        assert_eq!(cli.question.as_deref(), Some("What now?"));
        assert_eq!(cli.mode, Some(TeamMode::Collaborate));
        assert!(cli.concurrent);
        assert_eq!(cli.output, Some(OutputFormatArg::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_chat_without_question() {
        let cli = Cli::parse_from(["crew", "--chat", "--session", "s1", "--user", "u1"]);
        assert!(cli.chat);
        assert!(cli.question.is_none());
        assert_eq!(cli.session.as_deref(), Some("s1"));
        assert_eq!(cli.user.as_deref(), Some("u1"));
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        assert!(Cli::try_parse_from(["crew", "--mode", "vote", "q"]).is_err());
    }

    #[test]
    fn test_output_arg_maps_to_domain_format() {
        assert_eq!(OutputFormat::from(OutputFormatArg::Full), OutputFormat::Full);
    }
}
