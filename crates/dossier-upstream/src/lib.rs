//! HTTP clients for the hosted services the dossier pipeline depends on:
//! web search, chat completion, and geocoding.

pub mod completion;
pub mod error;
pub mod geocode;
pub mod search;
pub mod types;

mod http;

pub use completion::CompletionClient;
pub use error::UpstreamError;
pub use geocode::GeocodeClient;
pub use search::SearchClient;
pub use types::{
    ChatMessage, ChatRole, Choice, ChoiceMessage, CompletionResponse, GeocodeCandidate,
    SearchResult,
};
