use crate::core::error::SiakError;
use crate::providers::base_client::HttpClient;
use crate::providers::{CompletionProvider, CompletionRequest, ContentPart};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatCompletionMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionMessage {
    role: String,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Plain(String),
    Parts(Vec<ContentBlock>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Any chat-completions endpoint speaking the OpenAI wire format.
#[derive(Clone)]
pub struct OpenAICompatibleProvider {
    client: HttpClient,
}

impl OpenAICompatibleProvider {
    pub fn new(
        base_url: Option<String>,
        api_key: String,
        timeout: Option<Duration>,
    ) -> Result<Self, SiakError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let auth_header = Some(("Authorization".to_string(), format!("Bearer {}", api_key)));

        Ok(Self {
            client: HttpClient::new(base_url, auth_header, None, timeout)?,
        })
    }
}

fn build_payload(request: &CompletionRequest) -> ChatCompletionRequest {
    let blocks = request
        .parts
        .iter()
        .map(|part| match part {
            // Inline images travel as data URLs
            ContentPart::InlineImage { mime_type, data } => ContentBlock::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{};base64,{}", mime_type, data),
                },
            },
            ContentPart::Text(text) => ContentBlock::Text { text: text.clone() },
        })
        .collect();

    ChatCompletionRequest {
        model: request.model.clone(),
        messages: vec![
            ChatCompletionMessage {
                role: "system".to_string(),
                content: MessageContent::Plain(request.system_instruction.clone()),
            },
            ChatCompletionMessage {
                role: "user".to_string(),
                content: MessageContent::Parts(blocks),
            },
        ],
        temperature: request.temperature,
    }
}

fn extract_text(response: ChatCompletionResponse) -> Option<String> {
    let content = response.choices.into_iter().next()?.message.content?;
    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

#[async_trait]
impl CompletionProvider for OpenAICompatibleProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, request: &CompletionRequest) -> Result<String, SiakError> {
        let payload = build_payload(request);
        let response = self.client.post("chat/completions", &payload).await?;

        let response_body = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&response_body)?;

        extract_text(parsed).ok_or(SiakError::EmptyResponse)
    }
}
