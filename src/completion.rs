use crate::agents::{AgentMode, ModelCatalog};
use crate::attachment::IMAGE_MIME_TYPE;
use crate::core::error::SiakError;
use crate::providers::{CompletionProvider, CompletionRequest, ContentPart};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub const MISSING_CREDENTIAL_REPLY: &str = "Error: API Key is missing.";
pub const EMPTY_REPLY: &str = "Maaf, saya tidak dapat menghasilkan respons saat ini.";
pub const FAILURE_REPLY: &str = "Terjadi kesalahan saat menghubungi server AI. Pastikan koneksi internet stabil atau coba lagi nanti.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Answered,
    Empty,
    Failed,
    MissingCredential,
}

/// Text to show for one completion, whatever happened at the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReply {
    pub text: String,
    pub outcome: ReplyOutcome,
}

impl CompletionReply {
    fn fixed(text: &str, outcome: ReplyOutcome) -> Self {
        Self {
            text: text.to_string(),
            outcome,
        }
    }

    pub fn is_answer(&self) -> bool {
        self.outcome == ReplyOutcome::Answered
    }
}

/// Stateless single-shot completion: no previous turns are ever sent.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Option<Arc<dyn CompletionProvider>>,
    models: ModelCatalog,
    temperature: f32,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>, models: ModelCatalog, temperature: f32) -> Self {
        Self {
            provider: Some(provider),
            models,
            temperature,
        }
    }

    /// A client that answers every request with the missing-credential reply.
    pub fn without_credential(models: ModelCatalog, temperature: f32) -> Self {
        Self {
            provider: None,
            models,
            temperature,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    pub fn models(&self) -> &ModelCatalog {
        &self.models
    }

    pub fn build_request(&self, mode: AgentMode, text: &str, image: Option<&str>) -> CompletionRequest {
        let mut parts = Vec::with_capacity(2);
        if let Some(data) = image {
            parts.push(ContentPart::InlineImage {
                mime_type: IMAGE_MIME_TYPE.to_string(),
                data: data.to_string(),
            });
        }
        parts.push(ContentPart::Text(text.to_string()));

        CompletionRequest {
            model: self.models.select(mode, image.is_some()).to_string(),
            system_instruction: mode.profile().system_instruction.to_string(),
            parts,
            temperature: self.temperature,
        }
    }

    /// Never fails: every error path resolves to a fixed user-safe reply.
    pub async fn complete(&self, mode: AgentMode, text: &str, image: Option<&str>) -> CompletionReply {
        let Some(provider) = &self.provider else {
            warn!(%mode, "completion requested without an API credential");
            return CompletionReply::fixed(MISSING_CREDENTIAL_REPLY, ReplyOutcome::MissingCredential);
        };

        let request = self.build_request(mode, text, image);
        debug!(
            %mode,
            provider = provider.name(),
            model = %request.model,
            images = request.image_count(),
            "sending completion request"
        );

        match provider.generate(&request).await {
            Ok(reply) if !reply.is_empty() => CompletionReply {
                text: reply,
                outcome: ReplyOutcome::Answered,
            },
            Ok(_) | Err(SiakError::EmptyResponse) => {
                warn!(%mode, model = %request.model, "provider returned no text");
                CompletionReply::fixed(EMPTY_REPLY, ReplyOutcome::Empty)
            }
            Err(e) => {
                error!(%mode, model = %request.model, error = %e, "completion request failed");
                CompletionReply::fixed(FAILURE_REPLY, ReplyOutcome::Failed)
            }
        }
    }
}
