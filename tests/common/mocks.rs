use async_trait::async_trait;
use gemini_relay::{
    Error, Result,
    llm::{GenerationRequest, GenerationResult, LlmClient},
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock LLM client that records every request it receives
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
    pub output: Option<String>,
    pub error: Option<String>,
    pub echo_prompt: bool,
    pub delay: Option<Duration>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Reply with `echo: <prompt>` so concurrent callers can tell results apart.
    pub fn echoing(mut self) -> Self {
        self.echo_prompt = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_content(&self, request: GenerationRequest) -> Result<GenerationResult> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        if self.echo_prompt {
            return Ok(GenerationResult {
                output_text: format!("echo: {}", request.prompt),
            });
        }

        match self.output {
            Some(ref output) => Ok(GenerationResult {
                output_text: output.clone(),
            }),
            None => Err(Error::llm("No mock output configured")),
        }
    }
}
