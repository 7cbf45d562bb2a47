//! Property dossier aggregation pipeline.
//!
//! Fans three search queries out for an address, flattens the hits into a
//! numbered citation context, asks a hosted LLM for a JSON dossier, and
//! attaches the first few real sources to the result.

pub mod context;
pub mod error;
pub mod fanout;
pub mod finalize;
pub mod pipeline;
pub mod prompt;

pub use context::{assemble_context, AssembledContext};
pub use error::{AggregatorError, ErrorKind};
pub use pipeline::{Aggregator, AggregatorConfig};
