//! Scripted `ChatModel` for pipeline tests.
//!
//! Replies are matched by a needle searched in the system prompt, so concurrently
//! issued calls get deterministic answers regardless of completion order.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{ChatModel, ChatRequest, Completion, LlmError, TokenUsage};

enum Reply {
    Content(String, TokenUsage),
    Failure(u16, String),
}

pub struct ScriptedModel {
    model: String,
    replies: Vec<(String, Reply)>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

pub fn usage(prompt_tokens: u32, completion_tokens: u32) -> TokenUsage {
    TokenUsage {
        prompt_tokens,
        completion_tokens,
        total_tokens: prompt_tokens + completion_tokens,
    }
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            replies: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn reply_when(mut self, needle: &str, content: &str, usage: TokenUsage) -> Self {
        self.replies.push((
            needle.to_string(),
            Reply::Content(content.to_string(), usage),
        ));
        self
    }

    pub fn fail_when(mut self, needle: &str, status: u16, message: &str) -> Self {
        self.replies.push((
            needle.to_string(),
            Reply::Failure(status, message.to_string()),
        ));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: ChatRequest<'_>) -> Result<Completion, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: request.system.to_string(),
            user: request.user.to_string(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        });

        let reply = self
            .replies
            .iter()
            .find(|(needle, _)| request.system.contains(needle.as_str()))
            .map(|(_, reply)| reply);

        match reply {
            Some(Reply::Content(content, usage)) => Ok(Completion {
                content: Some(content.clone()),
                usage: *usage,
                model: self.model.clone(),
            }),
            Some(Reply::Failure(status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Err(LlmError::Api {
                status: 500,
                message: "no scripted reply".to_string(),
            }),
        }
    }
}
