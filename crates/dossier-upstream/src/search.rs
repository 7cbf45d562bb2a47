//! HTTP client for the web search API.
//!
//! Each call posts one natural-language query and returns the hits in the
//! order the API ranked them.

use reqwest::{Client, Url};

use crate::error::UpstreamError;
use crate::http::{decode_json, endpoint, normalise_base_url};
use crate::types::{SearchRequest, SearchResponse, SearchResult};

const SEARCH_TYPE: &str = "standard";

/// Client for the search API.
///
/// The base URL comes from configuration so tests can point it at a mock
/// server.
pub struct SearchClient {
    client: Client,
    api_key: String,
    search_url: Url,
}

impl SearchClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// No request timeout is set: a hung call waits on the transport.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`UpstreamError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: &str,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        let base = normalise_base_url(base_url)?;
        let search_url = endpoint(&base, "search")?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            search_url,
        })
    }

    /// Runs one query, asking for at most `max_results` hits.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Http`] on network failure.
    /// - [`UpstreamError::UnexpectedStatus`] on a non-2xx status.
    /// - [`UpstreamError::Deserialize`] if the body is not a search response.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, UpstreamError> {
        let request = SearchRequest {
            query,
            max_num_results: max_results,
            search_type: SEARCH_TYPE,
        };

        let response = self
            .client
            .post(self.search_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let parsed: SearchResponse = decode_json(response, "search").await?;
        let results = parsed.results.unwrap_or_default();

        tracing::debug!(query, count = results.len(), "search returned results");
        Ok(results)
    }
}
