/// LLM Client — the single point of entry for all Claude API calls in Lookbook.
///
/// No other module may call the Anthropic API directly. Callers depend on the
/// `TextGenerator` trait so the handle can be swapped for a test double.
///
/// Model: claude-3-5-sonnet-20241022 (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in Lookbook.
pub const MODEL: &str = "claude-3-5-sonnet-20241022";
/// Upper bound on generated output per call.
pub const MAX_TOKENS: u32 = 2048;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("ANTHROPIC_API_KEY is not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that turns a prompt into free text.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anthropic Messages API client with retry logic.
///
/// Constructed once at startup from `Config` and shared through `AppState`.
/// Without an API key every call fails fast with `LlmError::MissingCredential`.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("ANTHROPIC_API_KEY not set, skipping model call");
            return Err(LlmError::MissingCredential);
        };

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Yields each balanced top-level `{ ... }` span in `text`, in order.
///
/// Models often wrap JSON in prose or code fences, and the prose may carry
/// braces of its own. Braces inside JSON strings are skipped. A `{` that never
/// closes is passed over and the scan resumes at the next one.
pub fn json_object_candidates(text: &str) -> impl Iterator<Item = &str> {
    let mut cursor = 0;
    std::iter::from_fn(move || {
        while let Some(found) = text[cursor..].find('{') {
            let start = cursor + found;
            match balanced_object_len(&text[start..]) {
                Some(len) => {
                    cursor = start + len;
                    return Some(&text[start..start + len]);
                }
                None => cursor = start + 1,
            }
        }
        None
    })
}

/// Byte length of the object opening at the start of `text`, if it closes.
fn balanced_object_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset + 1);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_candidate(text: &str) -> Option<&str> {
        json_object_candidates(text).next()
    }

    #[test]
    fn test_extract_json_plain_object() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(first_candidate(input), Some("{\"key\": \"value\"}"));
    }

    #[test]
    fn test_extract_json_inside_code_fence() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(first_candidate(input), Some("{\"key\": \"value\"}"));
    }

    #[test]
    fn test_extract_json_wrapped_in_prose() {
        let input = "Here is your outfit:\n{\"a\": {\"b\": 1}}\nEnjoy! {not json}";
        assert_eq!(
            json_object_candidates(input).collect::<Vec<_>>(),
            vec!["{\"a\": {\"b\": 1}}", "{not json}"]
        );
    }

    #[test]
    fn test_extract_json_skips_unclosed_prose_brace() {
        let input = "Pick a {style and go:\n{\"a\": 1}";
        assert_eq!(
            json_object_candidates(input).collect::<Vec<_>>(),
            vec!["{\"a\": 1}"]
        );
    }

    #[test]
    fn test_extract_json_ignores_braces_in_strings() {
        let input = r#"{"tip": "use } and { freely", "q": "say \"}\""} trailing"#;
        assert_eq!(
            first_candidate(input),
            Some(r#"{"tip": "use } and { freely", "q": "say \"}\""}"#)
        );
    }

    #[test]
    fn test_extract_json_none_without_object() {
        assert_eq!(first_candidate("I cannot help with that."), None);
        assert_eq!(first_candidate(""), None);
    }

    #[test]
    fn test_extract_json_truncated_reply_yields_only_closed_objects() {
        assert_eq!(
            json_object_candidates("{\"items\": [ {\"a\": 1 }").collect::<Vec<_>>(),
            vec!["{\"a\": 1 }"]
        );
        assert_eq!(first_candidate("{\"items\": [ {\"a\": 1"), None);
    }

    #[tokio::test]
    async fn test_missing_credential_fails_without_network() {
        let client = LlmClient::new(None);
        assert!(!client.has_credential());
        let err = client.complete("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingCredential));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        assert!(!LlmClient::new(Some("   ".to_string())).has_credential());
        assert!(LlmClient::new(Some("sk-test".to_string())).has_credential());
    }

    #[test]
    fn test_response_text_picks_first_text_block() {
        let json = r#"{
            "content": [
                {"type": "tool_use", "text": null},
                {"type": "text", "text": "hello"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 2}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("hello"));
    }
}
