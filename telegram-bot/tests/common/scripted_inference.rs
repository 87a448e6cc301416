//! [`inference_client::InferenceClient`] that replays scripted completions and records calls.

use async_trait::async_trait;
use inference_client::{Completion, InferenceClient};
use prompt::ChatMessage;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded `complete` call.
#[derive(Debug, Clone)]
pub struct InferenceCall {
    pub history: Vec<ChatMessage>,
    pub message: String,
}

/// Returns queued completions in order; once the queue is empty every call answers
/// `"echo: <message>"`.
#[derive(Default)]
pub struct ScriptedInference {
    script: Mutex<VecDeque<Completion>>,
    calls: Mutex<Vec<InferenceCall>>,
}

impl ScriptedInference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: impl IntoIterator<Item = Completion>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<InferenceCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for ScriptedInference {
    async fn complete(&self, history: &[ChatMessage], message: &str) -> Completion {
        self.calls.lock().unwrap().push(InferenceCall {
            history: history.to_vec(),
            message: message.to_string(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Completion::Answer(format!("echo: {}", message)))
    }
}
