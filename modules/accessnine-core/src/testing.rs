// Test double for the LanguageModel seam.
//
// StubModel returns one canned reply (or one canned failure) for every call
// and records each CompletionRequest it receives.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::model::{CompletionRequest, LanguageModel};

enum Outcome {
    Reply(String),
    Fail(String),
}

pub struct StubModel {
    outcome: Outcome,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubModel {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Reply(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Fail(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        match self.outcome {
            Outcome::Reply(ref text) => Ok(text.clone()),
            Outcome::Fail(ref message) => Err(anyhow!("{message}")),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}
