//! Console output formatter for team runs

use colored::Colorize;
use crew_domain::{OutputFormat, TeamRun};

/// Formats team runs for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a run in the requested format
    pub fn format(run: &TeamRun, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => Self::format_answer(run),
            OutputFormat::Full => Self::format_full(run),
            OutputFormat::Json => Self::format_json(run),
        }
    }

    /// Only the final answer
    pub fn format_answer(run: &TeamRun) -> String {
        let mut output = run.content.clone();
        if run.event.is_error() {
            output = format!("{} {}", "error:".red().bold(), output);
        }
        output.push('\n');
        output
    }

    /// The whole run as pretty JSON
    pub fn format_json(run: &TeamRun) -> String {
        serde_json::to_string_pretty(run).unwrap_or_else(|_| "{}".to_string())
    }

    /// Answer plus member responses and the conflict verdict
    pub fn format_full(run: &TeamRun) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Team Run"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Request:".cyan().bold(), run.prompt));
        output.push_str(&format!("{} {}\n", "Event:".cyan().bold(), run.event));
        if let Some(model) = &run.model {
            output.push_str(&format!("{} {}\n", "Leader:".cyan().bold(), model));
        }

        if !run.member_outcomes.is_empty() {
            output.push_str(&Self::section_header(&format!(
                "Members ({}/{} answered)",
                run.successful_members(),
                run.member_outcomes.len()
            )));
            for outcome in &run.member_outcomes {
                let title = format!("── {} ({}) ──", outcome.member, outcome.role);
                match &outcome.error {
                    None => output.push_str(&format!(
                        "\n{}\n{}\n",
                        title.yellow().bold(),
                        Self::indent(&outcome.content, "  ")
                    )),
                    Some(error) => output.push_str(&format!(
                        "\n{}\n  Error: {}\n",
                        title.red().bold(),
                        error
                    )),
                }
            }
        }

        if let Some(verdict) = &run.verdict {
            let label = if verdict.has_conflict {
                "Conflicts detected".yellow().bold()
            } else {
                "No conflicts".green().bold()
            };
            output.push_str(&Self::section_header("Conflict Analysis"));
            output.push_str(&format!(
                "\n{}\n{}\n",
                label,
                Self::indent(&verdict.rationale, "  ")
            ));
        }

        output.push_str(&Self::section_header("Answer"));
        output.push_str(&format!("\n{}\n", run.content));
        output.push_str(&Self::footer());

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
