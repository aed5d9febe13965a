//! Scripted provider for exercising the completion path without a network.

use super::{CompletionProvider, CompletionRequest};
use crate::core::error::SiakError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

pub enum Scripted {
    Reply(String),
    Empty,
    Fail(String),
}

#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new([Scripted::Reply(text.to_string())])
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, request: &CompletionRequest) -> Result<String, SiakError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Empty) | None => Err(SiakError::EmptyResponse),
            Some(Scripted::Fail(message)) => Err(SiakError::Network(message)),
        }
    }
}
