//! CLI entrypoint for crew
//!
//! Loads configuration, wires the adapters into a team and runs it once,
//! streamed, or as an interactive chat.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use crew_application::{
    ConversationLogger, LanguageModel, Member, MemberError, MemoryStore, ModelResponder,
    NoProgress, ProgressNotifier, SessionStorage, Team,
};
use crew_domain::OutputFormat;
use crew_infrastructure::{
    ConfigLoader, FileConfig, InMemoryMemoryStore, InMemorySessionStorage,
    JsonlConversationLogger, ProcessLanguageModel,
};
use crew_presentation::{ChatRepl, Cli, ConsoleFormatter, ProgressReporter};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting crew");

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("config: {}", issue.message);
    }
    let errors: Vec<&str> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.message.as_str())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let team = build_team(&config, cancel).await;
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let show_progress = !cli.quiet && config.output.show_progress;

    if cli.chat {
        let repl = ChatRepl::new(team)
            .with_progress(show_progress)
            .with_stream(cli.stream)
            .with_format(format);
        repl.run().await?;
        return Ok(());
    }

    let question = match cli.question {
        Some(q) => q,
        None => bail!("A request is required. Use --chat for interactive mode."),
    };

    if cli.stream {
        let mut stdout = std::io::stdout();
        let mut on_chunk = |chunk: &str| -> Result<(), MemberError> {
            stdout
                .write_all(chunk.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| MemberError::StreamAborted(e.to_string()))
        };
        team.run_stream(&question, &mut on_chunk).await?;
        println!();
        return Ok(());
    }

    let reporter;
    let progress: &dyn ProgressNotifier = if show_progress {
        reporter = ProgressReporter::new();
        &reporter
    } else {
        &NoProgress
    };
    let run = team.execute_with_progress(&question, progress).await?;
    print!("{}", ConsoleFormatter::format(&run, format));

    Ok(())
}

/// Command-line flags take precedence over every configuration source.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(mode) = cli.mode {
        config.team.mode = mode.as_str().to_string();
    }
    if cli.concurrent {
        config.team.is_async = true;
    }
    if cli.debug {
        config.team.debug = true;
    }
    if let Some(session) = &cli.session {
        config.session.id = Some(session.clone());
    }
    if let Some(user) = &cli.user {
        config.session.user_id = Some(user.clone());
    }
}

/// Initialize tracing: stderr always, plus a log file when configured.
///
/// `RUST_LOG` overrides the level chosen by `-v`.
fn init_logging(verbose: u8, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let Some(path) = file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(Some(guard))
}

/// Wire process-backed models, in-memory persistence and the transcript log into a team.
async fn build_team(config: &FileConfig, cancel: CancellationToken) -> Team {
    let leader = ProcessLanguageModel::from_config(&config.leader);
    if !leader.is_available() {
        warn!("leader command not found: {}", config.leader.command);
    }
    let leader: Arc<dyn LanguageModel> = Arc::new(leader);

    let members = config.members.iter().map(|m| {
        let model = ProcessLanguageModel::from_config(&m.backend);
        if !model.is_available() {
            warn!("command for member {} not found: {}", m.name, m.backend.command);
        }
        let model = Arc::new(model);
        Arc::new(
            ModelResponder::new(m.name.clone(), m.role.clone(), model)
                .with_instructions(m.instructions.clone()),
        ) as Arc<dyn Member>
    });

    let mut builder = Team::builder(config.to_team_config(), leader.clone())
        .members(members)
        .with_cancellation(cancel);

    if config.session.id.is_some() {
        let storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
        let mut memory = InMemoryMemoryStore::new();
        if config.session.summarize_with_leader {
            memory = memory.with_summarizer(leader);
        }
        let memory: Arc<dyn MemoryStore> = Arc::new(memory);
        builder = builder.with_storage(storage).with_memory(memory);
    }

    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::new(path)
    {
        info!("Writing conversation log to {}", logger.path().display());
        let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
        builder = builder.with_conversation_logger(logger);
    }

    builder.build().await
}
