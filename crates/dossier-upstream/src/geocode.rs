//! Address lookup against a Nominatim-compatible geocoder.

use reqwest::{header::ACCEPT_LANGUAGE, Client, Url};

use crate::error::UpstreamError;
use crate::http::{decode_json, endpoint, normalise_base_url};
use crate::types::GeocodeCandidate;

/// Queries shorter than this (after trimming) are not sent upstream.
pub const MIN_QUERY_CHARS: usize = 3;

/// Maximum candidates returned per lookup.
pub const MAX_CANDIDATES: usize = 5;

pub struct GeocodeClient {
    client: Client,
    search_url: Url,
    country: String,
}

impl GeocodeClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`UpstreamError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        user_agent: &str,
        country: &str,
        base_url: &str,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        let base = normalise_base_url(base_url)?;
        let search_url = endpoint(&base, "search")?;

        Ok(Self {
            client,
            search_url,
            country: country.to_owned(),
        })
    }

    /// Looks up address candidates for free text, restricted to the
    /// configured country.
    ///
    /// Returns an empty list without any network call when the trimmed query
    /// is shorter than [`MIN_QUERY_CHARS`].
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Http`] on network failure.
    /// - [`UpstreamError::UnexpectedStatus`] on a non-2xx status.
    /// - [`UpstreamError::Deserialize`] if the body is not a candidate list.
    pub async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, UpstreamError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let url = self.build_url(query);
        let response = self
            .client
            .get(url)
            .header(ACCEPT_LANGUAGE, "en-GB,en")
            .send()
            .await?;

        let mut candidates: Vec<GeocodeCandidate> = decode_json(response, "geocode").await?;
        candidates.truncate(MAX_CANDIDATES);
        Ok(candidates)
    }

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            pairs.append_pair("q", query);
            pairs.append_pair("countrycodes", &self.country);
            pairs.append_pair("addressdetails", "1");
            pairs.append_pair("limit", &MAX_CANDIDATES.to_string());
        }
        url
    }
}
