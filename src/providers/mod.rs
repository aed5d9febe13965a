use crate::core::error::SiakError;
use async_trait::async_trait;

pub mod base_client;
pub mod factory;
pub mod gemini;
pub mod openai_compatible;

/// One element of the user turn sent to the provider. Images precede text.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    InlineImage { mime_type: String, data: String },
    Text(String),
}

/// Provider-neutral shape of a single stateless completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_instruction: String,
    pub parts: Vec<ContentPart>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn image_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, ContentPart::InlineImage { .. }))
            .count()
    }
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the provider's text, or `SiakError::EmptyResponse` when it produced none.
    async fn generate(&self, request: &CompletionRequest) -> Result<String, SiakError>;
}

#[cfg(test)]
pub mod mock;
