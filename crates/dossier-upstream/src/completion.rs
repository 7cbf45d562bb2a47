//! HTTP client for an OpenAI-compatible chat completion endpoint.

use reqwest::{Client, Url};

use crate::error::UpstreamError;
use crate::http::{decode_json, endpoint, normalise_base_url};
use crate::types::{ChatMessage, CompletionRequest, CompletionResponse, ResponseFormat};

/// Client for the hosted completion API. The model id is fixed per client.
pub struct CompletionClient {
    client: Client,
    api_key: String,
    model: String,
    completions_url: Url,
}

impl CompletionClient {
    /// Creates a client rooted at `base_url`. `chat/completions` is
    /// appended to it.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`UpstreamError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        let base = normalise_base_url(base_url)?;
        let completions_url = endpoint(&base, "chat/completions")?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            completions_url,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `messages` and returns the decoded response envelope.
    ///
    /// With `json_mode` set the request carries
    /// `response_format: {"type": "json_object"}`.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Http`] on network failure.
    /// - [`UpstreamError::UnexpectedStatus`] on a non-2xx status; the body
    ///   text is preserved.
    /// - [`UpstreamError::Deserialize`] if the body is not a completion envelope.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        json_mode: bool,
    ) -> Result<CompletionResponse, UpstreamError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(self.completions_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        decode_json(response, "chat completion").await
    }
}
