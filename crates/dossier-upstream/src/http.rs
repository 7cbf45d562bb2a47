//! Shared request plumbing for the upstream clients.

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::error::UpstreamError;

/// Parses `base_url` and guarantees exactly one trailing slash so that
/// [`Url::join`] appends to the path instead of replacing its last segment.
pub(crate) fn normalise_base_url(base_url: &str) -> Result<Url, UpstreamError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| UpstreamError::InvalidBaseUrl {
        base_url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Joins a relative endpoint onto a normalised base URL.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, UpstreamError> {
    base.join(path).map_err(|e| UpstreamError::InvalidBaseUrl {
        base_url: base.to_string(),
        reason: e.to_string(),
    })
}

/// Reads the full body, rejects non-2xx statuses, and decodes the body as `T`.
///
/// The body is read before the status check so that a failing response keeps
/// its text for diagnostics.
///
/// # Errors
///
/// - [`UpstreamError::Http`] if the body cannot be read.
/// - [`UpstreamError::UnexpectedStatus`] on a non-2xx status.
/// - [`UpstreamError::Deserialize`] if the body does not decode as `T`.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, UpstreamError> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(UpstreamError::UnexpectedStatus {
            status: status.as_u16(),
            url,
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| UpstreamError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_to_versioned_base() {
        let base = normalise_base_url("https://ai.gateway.example.dev/v1").unwrap();
        let url = endpoint(&base, "chat/completions").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ai.gateway.example.dev/v1/chat/completions"
        );
    }

    #[test]
    fn endpoint_collapses_trailing_slashes() {
        let base = normalise_base_url("https://api.example.ai///").unwrap();
        let url = endpoint(&base, "search").unwrap();
        assert_eq!(url.as_str(), "https://api.example.ai/search");
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let err = normalise_base_url("not a url").unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidBaseUrl { .. }));
    }
}
