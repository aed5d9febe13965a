use crate::core::error::SiakError;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    auth_header: Option<(String, String)>,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    pub fn new(
        base_url: String,
        auth_header: Option<(String, String)>,
        extra_headers: Option<HashMap<String, String>>,
        timeout: Option<Duration>,
    ) -> Result<Self, SiakError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
            extra_headers: extra_headers.unwrap_or_default(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POSTs a JSON payload; non-success statuses become `SiakError::Api`.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, SiakError> {
        let mut request = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json");

        if let Some((key, value)) = &self.auth_header {
            request = request.header(key, value);
        }

        for (key, value) in &self.extra_headers {
            request = request.header(key, value);
        }

        let response = request.json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable error body>".to_string());
            return Err(SiakError::Api(format!(
                "{}: {}",
                status,
                api_error_message(&body)
            )));
        }

        Ok(response)
    }
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Pulls the human-readable message out of a `{"error": {...}}` body.
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            match wrapper.error.status {
                Some(status) if !status.is_empty() => format!("{}: {}", status, msg),
                _ => msg,
            }
        })
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_double_slash() {
        let client = HttpClient::new("https://example.test/".to_string(), None, None, None).unwrap();
        assert_eq!(client.url("/v1/chat"), "https://example.test/v1/chat");
        assert_eq!(client.url("v1/chat"), "https://example.test/v1/chat");
    }

    #[test]
    fn extracts_structured_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "INVALID_ARGUMENT: API key not valid");

        let openai = r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error"}}"#;
        assert_eq!(api_error_message(openai), "Incorrect API key");
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
    }
}
