//! Language model backed by an external command.
//!
//! Each call spawns the command, writes the conversation to its stdin as a
//! JSON array of `{"role", "content"}` objects and reads the reply from
//! stdout. A non-zero exit status fails the call with the command's stderr.

use crate::config::FileCommandConfig;
use async_trait::async_trait;
use crew_application::{LanguageModel, ModelError, ModelReply};
use crew_domain::core::string::truncate;
use crew_domain::{Message, Model};
use std::collections::BTreeMap;
use std::io;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, trace};

/// Bytes of stderr kept in error messages
const STDERR_EXCERPT: usize = 400;

/// Runs `command args...` once per invocation.
///
/// The child is killed when the call future is dropped, so timeouts and
/// cancellation do not leave processes behind.
#[derive(Debug, Clone)]
pub struct ProcessLanguageModel {
    model: Model,
    command: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl ProcessLanguageModel {
    pub fn new(model: Model, command: impl Into<String>) -> Self {
        Self {
            model,
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn from_config(config: &FileCommandConfig) -> Self {
        Self {
            model: Model::new(config.model_name()),
            command: config.command.clone(),
            args: config.args.clone(),
            env: config.env.clone(),
        }
    }

    /// Whether the command can be found on `PATH` (or as a path).
    ///
    /// Blocking lookup, meant for startup checks. `invoke` reports a missing
    /// command as [`ModelError::Unavailable`] on its own.
    pub fn is_available(&self) -> bool {
        which::which(&self.command).is_ok()
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Linux: have the kernel terminate the child if this process dies.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd
    }
}

#[async_trait]
impl LanguageModel for ProcessLanguageModel {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn invoke(&self, messages: &[Message]) -> Result<ModelReply, ModelError> {
        let input = serde_json::to_vec(messages)
            .map_err(|e| ModelError::RequestFailed(format!("encode messages: {}", e)))?;

        debug!(
            "Invoking {} ({} messages, {} bytes)",
            self.model,
            messages.len(),
            input.len()
        );

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|e| ModelError::Unavailable(format!("{}: {}", self.command, e)))?;

        // Feed stdin while draining stdout/stderr; a child that fills its
        // output pipe before reading all input would otherwise never exit.
        let stdin = child.stdin.take();
        let write = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&input).await?;
                stdin.shutdown().await?;
            }
            Ok::<_, io::Error>(())
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());

        let output = output.map_err(|e| ModelError::RequestFailed(format!("wait: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ModelError::RequestFailed(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                truncate(stderr.trim(), STDERR_EXCERPT)
            )));
        }

        match written {
            Ok(()) => {}
            // The command answered without reading all of its input.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!("{} closed stdin early", self.command);
            }
            Err(e) => return Err(ModelError::RequestFailed(format!("write stdin: {}", e))),
        }

        let content = String::from_utf8_lossy(&output.stdout).trim().to_string();
        trace!("{} replied with {} bytes", self.model, content.len());

        Ok(ModelReply::new(content, self.model.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn shell(script: &str) -> ProcessLanguageModel {
        ProcessLanguageModel::new(Model::new("sh"), "sh").with_args(["-c", script])
    }

    #[tokio::test]
    async fn test_messages_are_sent_as_json() {
        let model = shell("cat");
        let reply = model
            .invoke(&[Message::system("be brief"), Message::user("hello")])
            .await
            .unwrap();

        let echoed: Vec<Message> = serde_json::from_str(&reply.content).unwrap();
        assert_eq!(echoed, vec![Message::system("be brief"), Message::user("hello")]);
        assert_eq!(reply.model, Model::new("sh"));
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let model = shell("cat > /dev/null; printf '\\n  answer  \\n'");
        let reply = model.invoke(&[Message::user("q")]).await.unwrap();
        assert_eq!(reply.content, "answer");
    }

    #[tokio::test]
    async fn test_env_is_passed() {
        let model = shell("cat > /dev/null; printf \"$GREETING\"").with_env("GREETING", "hi");
        let reply = model.invoke(&[Message::user("q")]).await.unwrap();
        assert_eq!(reply.content, "hi");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_request_failure() {
        let model = shell("cat > /dev/null; echo boom >&2; exit 3");
        let err = model.invoke(&[Message::user("q")]).await.unwrap_err();
        match err {
            ModelError::RequestFailed(msg) => assert!(msg.contains("boom")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_large_input_does_not_block() {
        let model = shell("cat");
        let body = "x".repeat(300 * 1024);

        let reply = tokio::time::timeout(
            Duration::from_secs(10),
            model.invoke(&[Message::user(body.clone())]),
        )
        .await
        .expect("invoke should finish")
        .unwrap();

        let echoed: Vec<Message> = serde_json::from_str(&reply.content).unwrap();
        assert_eq!(echoed, vec![Message::user(body)]);
    }

    #[tokio::test]
    async fn test_command_ignoring_input_still_answers() {
        let body = "y".repeat(300 * 1024);
        let reply = shell("printf done")
            .invoke(&[Message::user(body)])
            .await
            .unwrap();
        assert_eq!(reply.content, "done");
    }

    #[tokio::test]
    async fn test_missing_command_is_unavailable() {
        let model = ProcessLanguageModel::new(Model::new("x"), "crew-no-such-command-5b1f");
        assert!(!model.is_available());
        let err = model.invoke(&[Message::user("q")]).await.unwrap_err();
        assert!(matches!(err, ModelError::Unavailable(_)));
    }

    #[test]
    fn test_from_config_defaults_model_to_command() {
        let config = FileCommandConfig {
            command: "bridge".to_string(),
            args: vec!["--fast".to_string()],
            ..Default::default()
        };
        let model = ProcessLanguageModel::from_config(&config);
        assert_eq!(model.model(), &Model::new("bridge"));
        assert_eq!(model.args, vec!["--fast"]);
    }
}
