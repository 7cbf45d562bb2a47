//! Turns the completion response into the dossier returned to callers.

use dossier_core::{Dossier, RawSource, SourceEntry, MAX_RAW_SOURCES};
use dossier_upstream::CompletionResponse;
use serde_json::Value;

use crate::error::AggregatorError;

/// Parses the first choice's text as JSON and replaces its `raw_sources`
/// with the first [`MAX_RAW_SOURCES`] collected sources (ids dropped).
///
/// Whatever `raw_sources` the model wrote is discarded. Other fields pass
/// through untouched unless `strict` is set, in which case the result must
/// also deserialize as a [`Dossier`] and pass [`Dossier::check_bounds`].
///
/// # Errors
///
/// - [`AggregatorError::EmptyCompletion`] when there is no first choice text.
/// - [`AggregatorError::MalformedOutput`] when the text is not JSON.
/// - [`AggregatorError::NotAnObject`] when the JSON is not an object.
/// - [`AggregatorError::Schema`] in strict mode on any schema mismatch.
pub fn finalize_dossier(
    response: &CompletionResponse,
    sources: &[SourceEntry],
    strict: bool,
) -> Result<Value, AggregatorError> {
    let content = response
        .first_content()
        .ok_or(AggregatorError::EmptyCompletion)?;

    let mut dossier: Value =
        serde_json::from_str(content).map_err(AggregatorError::MalformedOutput)?;

    let fields = dossier
        .as_object_mut()
        .ok_or(AggregatorError::NotAnObject)?;

    let raw_sources: Vec<RawSource> = sources
        .iter()
        .take(MAX_RAW_SOURCES)
        .map(SourceEntry::to_raw)
        .collect();
    let raw_sources =
        serde_json::to_value(raw_sources).map_err(AggregatorError::SourceEncoding)?;
    fields.insert("raw_sources".to_string(), raw_sources);

    if strict {
        let typed: Dossier = serde_json::from_value(dossier.clone())
            .map_err(|e| AggregatorError::Schema(e.to_string()))?;
        typed.check_bounds().map_err(AggregatorError::Schema)?;
    }

    Ok(dossier)
}
