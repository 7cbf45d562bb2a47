use std::error::Error as _;

use dossier_upstream::UpstreamError;
use thiserror::Error;

/// Coarse classification used for logging and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Configuration,
    Upstream,
    Schema,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Upstream => "upstream",
            ErrorKind::Schema => "schema",
        }
    }
}

/// Fatal pipeline errors. Individual search failures never surface here;
/// the fanout absorbs them.
#[derive(Debug, Error)]
pub enum AggregatorError {
    #[error("Address is required")]
    MissingAddress,

    /// Names the environment variable that should hold the credential.
    #[error("{0} not configured")]
    MissingCredential(&'static str),

    #[error("failed to set up upstream client: {0}")]
    ClientSetup(#[source] UpstreamError),

    /// Shows only the gateway status; the URL stays in the source chain.
    #[error("AI gateway error: {}", gateway_summary(.0))]
    Completion(#[source] UpstreamError),

    #[error("completion response contained no message content")]
    EmptyCompletion,

    #[error("model output is not valid JSON: {0}")]
    MalformedOutput(#[source] serde_json::Error),

    #[error("model output is not a JSON object")]
    NotAnObject,

    #[error("model output does not match the dossier schema: {0}")]
    Schema(String),

    #[error("failed to encode raw sources: {0}")]
    SourceEncoding(#[source] serde_json::Error),
}

fn gateway_summary(err: &UpstreamError) -> String {
    match err {
        UpstreamError::UnexpectedStatus { status, .. } => status.to_string(),
        UpstreamError::Http(_) => "request failed".to_string(),
        UpstreamError::InvalidBaseUrl { .. } => "invalid base URL".to_string(),
        UpstreamError::Deserialize { .. } => "unreadable response".to_string(),
    }
}

impl AggregatorError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AggregatorError::MissingAddress => ErrorKind::Validation,
            AggregatorError::MissingCredential(_) | AggregatorError::ClientSetup(_) => {
                ErrorKind::Configuration
            }
            AggregatorError::Completion(_)
            | AggregatorError::EmptyCompletion
            | AggregatorError::MalformedOutput(_)
            | AggregatorError::NotAnObject => ErrorKind::Upstream,
            AggregatorError::Schema(_) | AggregatorError::SourceEncoding(_) => ErrorKind::Schema,
        }
    }

    /// Best-effort diagnostic text for the error envelope's `details` field.
    ///
    /// For a rejected completion call this is the upstream response body;
    /// otherwise it is the chain of underlying causes, if any.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        if let AggregatorError::Completion(UpstreamError::UnexpectedStatus { body, .. }) = self {
            if !body.trim().is_empty() {
                return Some(body.clone());
            }
        }

        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(err) = source {
            causes.push(err.to_string());
            source = err.source();
        }

        if causes.is_empty() {
            None
        } else {
            Some(causes.join(": "))
        }
    }
}
