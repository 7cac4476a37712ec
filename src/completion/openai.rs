//! OpenAI-compatible chat completions over blocking HTTP.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Completion, CompletionError};
use crate::domain::Config;

/// Client for any endpoint implementing `POST {base_url}/chat/completions`.
///
/// The API key is read from the configured environment variable on every
/// request. An empty variable name disables authentication, for local
/// servers.
pub struct OpenAiClient {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key_env: String,
}

impl OpenAiClient {
    /// Creates a client for the given endpoint.
    #[must_use]
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key_env: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key_env: api_key_env.into(),
        }
    }

    /// Creates a client from the endpoint settings in `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.base_url,
            config.model.clone(),
            config.api_key_env.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// The full URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> Result<Option<String>, CompletionError> {
        if self.api_key_env.is_empty() {
            return Ok(None);
        }
        std::env::var(&self.api_key_env)
            .map(Some)
            .map_err(|_| CompletionError::MissingApiKey(self.api_key_env.clone()))
    }
}

impl Completion for OpenAiClient {
    fn complete(&self, prompt: &str, temperature: f32) -> Result<String, CompletionError> {
        let api_key = self.api_key()?;

        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            prompt_chars = prompt.len(),
            "requesting completion"
        );

        let request = self
            .agent
            .post(&self.endpoint)
            .header("content-type", "application/json");
        let request = match api_key {
            Some(key) => request.header("authorization", format!("Bearer {key}")),
            None => request,
        };

        let response = request
            .send_json(&body)
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        let response: ChatResponse = response
            .into_body()
            .read_json()
            .map_err(|e| CompletionError::Response(e.to_string()))?;

        reply_text(response)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

fn reply_text(response: ChatResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(CompletionError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key_env: &str) -> OpenAiClient {
        OpenAiClient::new(
            "https://api.example.com/v1/",
            "gpt-3.5-turbo",
            api_key_env,
            Duration::from_secs(5),
        )
    }

    #[test]
    fn endpoint_appends_chat_completions() {
        assert_eq!(
            client("").endpoint(),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn missing_api_key_fails_before_sending() {
        let error = client("ROBOSHOP_TEST_KEY_THAT_IS_NEVER_SET")
            .complete("hello", 0.7)
            .unwrap_err();

        assert!(matches!(error, CompletionError::MissingApiKey(name) if name == "ROBOSHOP_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn request_body_has_single_user_message() {
        let body = ChatRequest {
            model: "m",
            messages: [ChatMessage {
                role: "user",
                content: "prompt",
            }],
            temperature: 0.5,
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "prompt");
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn reply_text_takes_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"[1]"}},{"message":{"content":"[2]"}}]}"#,
        )
        .unwrap();

        assert_eq!(reply_text(response).unwrap(), "[1]");
    }

    #[test]
    fn null_or_blank_content_is_empty() {
        let null: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        let none: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();

        assert!(matches!(reply_text(null), Err(CompletionError::Empty)));
        assert!(matches!(reply_text(blank), Err(CompletionError::Empty)));
        assert!(matches!(reply_text(none), Err(CompletionError::Empty)));
    }
}
