//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::{ConsoleFormatter, ProgressReporter};
use crew_application::{MemberError, NoProgress, ProgressNotifier, Team};
use crew_domain::OutputFormat;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// What a slash command asks the loop to do
#[derive(Debug, PartialEq, Eq)]
enum CommandOutcome {
    Continue,
    Quit,
}

/// Interactive chat REPL over a single team
pub struct ChatRepl {
    team: Team,
    show_progress: bool,
    stream: bool,
    format: OutputFormat,
}

impl ChatRepl {
    pub fn new(team: Team) -> Self {
        Self {
            team,
            show_progress: true,
            stream: false,
            format: OutputFormat::Answer,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    /// Run the loop on stdin until `/quit` or end of input
    pub async fn run(&self) -> std::io::Result<()> {
        self.run_with(BufReader::new(tokio::io::stdin())).await
    }

    /// Run the loop over any line source
    pub async fn run_with<R: AsyncBufRead + Unpin>(&self, input: R) -> std::io::Result<()> {
        self.print_welcome();
        let mut lines = input.lines();

        loop {
            print!(">>> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!("Bye!");
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('/') {
                if self.handle_command(line).await == CommandOutcome::Quit {
                    break;
                }
                continue;
            }

            self.process_request(line).await;
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let config = self.team.config();
        println!();
        println!(
            "crew chat: team \"{}\" in {} mode, {} members",
            config.profile.name,
            config.mode,
            self.team.member_count()
        );
        if config.session.is_bound() {
            println!("Session: {}", config.session.session_id);
        }
        println!("Type /help for commands.");
        println!();
    }

    async fn handle_command(&self, cmd: &str) -> CommandOutcome {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                CommandOutcome::Quit
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /team            - Show the team and its members");
                println!("  /history         - Show the number of turns so far");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                CommandOutcome::Continue
            }
            "/team" => {
                let config = self.team.config();
                println!();
                println!("Team: {}", config.profile.name);
                println!("Mode: {}", config.mode);
                println!("Members: {}", self.team.member_count());
                println!();
                CommandOutcome::Continue
            }
            "/history" => {
                let history = self.team.history().await;
                println!("{} turn(s) in this session", history.len() / 2);
                CommandOutcome::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandOutcome::Continue
            }
        }
    }

    async fn process_request(&self, request: &str) {
        println!();
        let reporter;
        let progress: &dyn ProgressNotifier = if self.show_progress && !self.stream {
            reporter = ProgressReporter::new();
            &reporter
        } else {
            &NoProgress
        };

        let result = if self.stream {
            let mut stdout = std::io::stdout();
            let mut on_chunk = |chunk: &str| -> Result<(), MemberError> {
                stdout
                    .write_all(chunk.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(|e| MemberError::StreamAborted(e.to_string()))
            };
            let result = self
                .team
                .execute_stream(request, &mut on_chunk, progress)
                .await;
            println!();
            result
        } else {
            self.team.execute_with_progress(request, progress).await
        };

        match result {
            Ok(run) if !self.stream => {
                print!("{}", ConsoleFormatter::format(&run, self.format));
            }
            Ok(_) => {}
            Err(e) => eprintln!("Error: {}", e),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crew_application::{LanguageModel, Member, ModelError, ModelReply, TeamConfig};
    use crew_domain::{Message, Model, TeamMode, TeamProfile};
    use std::sync::Arc;

    struct PickFirst(Model);

    #[async_trait]
    impl LanguageModel for PickFirst {
        fn model(&self) -> &Model {
            &self.0
        }

        async fn invoke(&self, _messages: &[Message]) -> Result<ModelReply, ModelError> {
            Ok(ModelReply::new("1", self.0.clone()))
        }
    }

    struct Echo;

    #[async_trait]
    impl Member for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn role(&self) -> &str {
            "repeats the request"
        }

        async fn run(&self, prompt: &str) -> Result<String, MemberError> {
            Ok(format!("echo: {}", prompt))
        }
    }

    async fn repl() -> ChatRepl {
        let config = TeamConfig::new(TeamProfile::new("chat")).with_mode(TeamMode::Route);
        let team = Team::builder(config, Arc::new(PickFirst(Model::new("leader"))))
            .member(Arc::new(Echo))
            .build()
            .await;
        ChatRepl::new(team).with_progress(false)
    }

    #[tokio::test]
    async fn test_requests_build_history_until_quit() {
        let repl = repl().await;
        let input: &[u8] = b"/help\nfirst\n\nsecond\n/quit\nnever sent\n";

        repl.run_with(input).await.unwrap();

        let history = repl.team().history().await;
        assert_eq!(history.len(), 4);
        assert_eq!(history[1], Message::assistant("echo: first"));
        assert_eq!(history[2], Message::user("second"));
    }

    #[tokio::test]
    async fn test_end_of_input_stops_loop() {
        let repl = repl().await.with_stream(true);
        let input: &[u8] = b"only";

        repl.run_with(input).await.unwrap();

        assert_eq!(repl.team().history().await.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_command_continues() {
        let repl = repl().await;
        assert_eq!(repl.handle_command("/nope").await, CommandOutcome::Continue);
        assert_eq!(repl.handle_command("/exit").await, CommandOutcome::Quit);
    }
}
