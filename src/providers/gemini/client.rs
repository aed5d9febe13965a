use crate::core::error::SiakError;
use crate::providers::base_client::HttpClient;
use crate::providers::gemini::types::*;
use crate::providers::{CompletionRequest, ContentPart};
use std::time::Duration;

#[derive(Clone)]
pub struct GeminiClient {
    client: HttpClient,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        timeout: Option<Duration>,
    ) -> Result<Self, SiakError> {
        // Key goes in a header, never in the URL
        let auth_header = Some(("x-goog-api-key".to_string(), api_key));
        let client = HttpClient::new(base_url, auth_header, None, timeout)?;

        Ok(Self { client })
    }

    pub async fn generate_content(&self, request: &CompletionRequest) -> Result<String, SiakError> {
        let payload = build_payload(request);
        let response = self
            .client
            .post(
                &format!("v1beta/models/{}:generateContent", request.model),
                &payload,
            )
            .await?;

        let response_body = response.text().await?;
        let parsed: GeminiResponse = serde_json::from_str(&response_body).map_err(|e| {
            SiakError::Serialization(format!("Failed to parse Gemini response: {}", e))
        })?;

        extract_text(parsed).ok_or(SiakError::EmptyResponse)
    }
}

pub fn build_payload(request: &CompletionRequest) -> GeminiRequest {
    let parts = request
        .parts
        .iter()
        .map(|part| match part {
            ContentPart::InlineImage { mime_type, data } => GeminiPart::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.clone(),
                    data: data.clone(),
                },
            },
            ContentPart::Text(text) => GeminiPart::Text { text: text.clone() },
        })
        .collect();

    let system_instruction = if request.system_instruction.trim().is_empty() {
        None
    } else {
        Some(SystemInstruction {
            parts: vec![GeminiPart::Text {
                text: request.system_instruction.clone(),
            }],
        })
    };

    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user".to_string(),
            parts,
        }],
        system_instruction,
        generation_config: GenerationConfig {
            temperature: request.temperature,
        },
    }
}

/// Concatenates the text parts of the first candidate; `None` when that is empty.
pub fn extract_text(response: GeminiResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_with_image() -> CompletionRequest {
        CompletionRequest {
            model: "gemini-2.5-flash-image".to_string(),
            system_instruction: "PERAN: Klinis".to_string(),
            parts: vec![
                ContentPart::InlineImage {
                    mime_type: "image/png".to_string(),
                    data: "QUJD".to_string(),
                },
                ContentPart::Text("cek hasil ini".to_string()),
            ],
            temperature: 0.4,
        }
    }

    #[tokio::test]
    async fn failed_request_does_not_leak_api_key() {
        let client = GeminiClient::new(
            "http://127.0.0.1:9".to_string(),
            "SECRET-KEY-123".to_string(),
            Some(Duration::from_secs(5)),
        )
        .unwrap();

        let err = client.generate_content(&request_with_image()).await.unwrap_err();
        assert!(matches!(err, SiakError::Network(_)));
        assert!(!err.to_string().contains("SECRET-KEY-123"));
    }

    #[test]
    fn payload_puts_image_before_text() {
        let value = serde_json::to_value(build_payload(&request_with_image())).unwrap();
        assert_eq!(
            value["contents"][0]["parts"],
            json!([
                {"inlineData": {"mimeType": "image/png", "data": "QUJD"}},
                {"text": "cek hasil ini"}
            ])
        );
        assert_eq!(value["contents"][0]["role"], "user");
    }

    #[test]
    fn payload_carries_system_instruction_and_temperature() {
        let value = serde_json::to_value(build_payload(&request_with_image())).unwrap();
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "PERAN: Klinis");
        let temperature = value["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.4).abs() < 1e-6);
    }

    #[test]
    fn extracts_and_joins_text_parts() {
        let parsed: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "Halo, "}, {"text": "dokter."}]}}]
        }))
        .unwrap();
        assert_eq!(extract_text(parsed).as_deref(), Some("Halo, dokter."));
    }

    #[test]
    fn blocked_or_empty_candidates_yield_none() {
        let no_candidates: GeminiResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert_eq!(extract_text(no_candidates), None);

        let no_content: GeminiResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(extract_text(no_content), None);

        let empty: GeminiResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}))
                .unwrap();
        assert_eq!(extract_text(empty), None);
    }
}
