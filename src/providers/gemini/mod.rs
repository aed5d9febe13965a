use crate::core::error::SiakError;
use crate::providers::{CompletionProvider, CompletionRequest};
use async_trait::async_trait;
use std::time::Duration;

mod client;
mod types;

pub use client::GeminiClient;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(
        base_url: Option<String>,
        api_key: String,
        timeout: Option<Duration>,
    ) -> Result<Self, SiakError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            client: GeminiClient::new(base_url, api_key, timeout)?,
        })
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, request: &CompletionRequest) -> Result<String, SiakError> {
        self.client.generate_content(request).await
    }
}
