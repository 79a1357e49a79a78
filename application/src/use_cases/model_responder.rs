//! Model-backed member
//!
//! The plain responder of a team: sends its instructions and the prompt to
//! its own language model.

use crate::ports::language_model::{LanguageModel, ModelError};
use crate::ports::member::{Member, MemberError};
use async_trait::async_trait;
use crew_domain::{Message, TeamPromptTemplate};
use std::sync::Arc;
use tracing::debug;

pub struct ModelResponder {
    name: String,
    role: String,
    instructions: String,
    model: Arc<dyn LanguageModel>,
}

impl ModelResponder {
    pub fn new(name: impl Into<String>, role: impl Into<String>, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            instructions: String::new(),
            model,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    fn messages(&self, prompt: &str) -> Vec<Message> {
        vec![
            Message::system(TeamPromptTemplate::responder_system(
                &self.name,
                &self.role,
                &self.instructions,
            )),
            Message::user(prompt),
        ]
    }
}

impl From<ModelError> for MemberError {
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::Timeout => MemberError::Timeout,
            ModelError::Cancelled => MemberError::Cancelled,
            other => MemberError::Failed(other.to_string()),
        }
    }
}

#[async_trait]
impl Member for ModelResponder {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> &str {
        &self.role
    }

    async fn run(&self, prompt: &str) -> Result<String, MemberError> {
        let reply = self.model.invoke(&self.messages(prompt)).await?;
        debug!("Member {} answered via {}", self.name, reply.model);
        Ok(reply.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::language_model::ModelReply;
    use crew_domain::{Model, Role};
    use std::sync::Mutex;

    struct RecordingModel {
        model: Model,
        seen: Mutex<Vec<Message>>,
        fail: bool,
    }

    impl RecordingModel {
        fn new(fail: bool) -> Self {
            Self {
                model: Model::new("responder-model"),
                seen: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn invoke(&self, messages: &[Message]) -> Result<ModelReply, ModelError> {
            *self.seen.lock().unwrap() = messages.to_vec();
            if self.fail {
                Err(ModelError::Timeout)
            } else {
                Ok(ModelReply::new("an answer", self.model.clone()))
            }
        }
    }

    #[tokio::test]
    async fn test_responder_sends_system_then_prompt() {
        let model = Arc::new(RecordingModel::new(false));
        let responder = ModelResponder::new("critic", "reviews drafts", model.clone())
            .with_instructions("Be blunt.");

        let answer = responder.run("Review this").await.unwrap();

        assert_eq!(answer, "an answer");
        let seen = model.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, Role::System);
        assert!(seen[0].content.contains("critic"));
        assert!(seen[0].content.contains("Be blunt."));
        assert_eq!(seen[1], Message::user("Review this"));
    }

    #[tokio::test]
    async fn test_responder_maps_model_errors() {
        let responder = ModelResponder::new("x", "y", Arc::new(RecordingModel::new(true)));
        assert_eq!(responder.run("q").await, Err(MemberError::Timeout));
    }

    #[tokio::test]
    async fn test_default_stream_emits_one_chunk() {
        let responder = ModelResponder::new("x", "y", Arc::new(RecordingModel::new(false)));
        let mut chunks = Vec::new();
        responder
            .run_stream("q", &mut |chunk: &str| {
                chunks.push(chunk.to_string());
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(chunks, vec!["an answer".to_string()]);
    }
}
