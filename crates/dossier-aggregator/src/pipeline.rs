//! Pipeline orchestration: fanout → assemble → prompt → finalize.

use dossier_core::AppConfig;
use dossier_upstream::{CompletionClient, SearchClient};
use serde_json::Value;

use crate::context::assemble_context;
use crate::error::AggregatorError;
use crate::fanout::{build_queries, fan_out};
use crate::finalize::finalize_dossier;
use crate::prompt::build_messages;

const SEARCH_KEY_VAR: &str = "VALYU_API_KEY";
const COMPLETION_KEY_VAR: &str = "LOVABLE_API_KEY";

/// Everything the aggregator needs, passed in explicitly so tests can point
/// it at mock endpoints with fake keys.
#[derive(Clone)]
pub struct AggregatorConfig {
    pub search_api_key: Option<String>,
    pub search_base_url: String,
    pub completion_api_key: Option<String>,
    pub completion_base_url: String,
    pub completion_model: String,
    pub user_agent: String,
    pub strict_schema: bool,
}

impl AggregatorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            search_api_key: config.search_api_key.clone(),
            search_base_url: config.search_base_url.clone(),
            completion_api_key: config.completion_api_key.clone(),
            completion_base_url: config.completion_base_url.clone(),
            completion_model: config.completion_model.clone(),
            user_agent: config.user_agent.clone(),
            strict_schema: config.strict_schema,
        }
    }
}

impl std::fmt::Debug for AggregatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregatorConfig")
            .field(
                "search_api_key",
                &self.search_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("search_base_url", &self.search_base_url)
            .field(
                "completion_api_key",
                &self.completion_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("completion_base_url", &self.completion_base_url)
            .field("completion_model", &self.completion_model)
            .field("user_agent", &self.user_agent)
            .field("strict_schema", &self.strict_schema)
            .finish()
    }
}

/// Request-scoped dossier builder. Holds only immutable clients, so one
/// instance can serve concurrent requests.
pub struct Aggregator {
    search: Option<SearchClient>,
    completion: Option<CompletionClient>,
    strict_schema: bool,
}

impl Aggregator {
    /// Builds the upstream clients for every credential that is present.
    ///
    /// A missing credential is not an error here; [`Aggregator::analyze`]
    /// reports it when a request arrives.
    ///
    /// # Errors
    ///
    /// Returns [`AggregatorError::ClientSetup`] if a base URL is invalid or an
    /// HTTP client cannot be constructed.
    pub fn new(config: &AggregatorConfig) -> Result<Self, AggregatorError> {
        let search = config
            .search_api_key
            .as_deref()
            .map(|key| {
                SearchClient::with_base_url(key, &config.user_agent, &config.search_base_url)
            })
            .transpose()
            .map_err(AggregatorError::ClientSetup)?;

        let completion = config
            .completion_api_key
            .as_deref()
            .map(|key| {
                CompletionClient::with_base_url(
                    key,
                    &config.completion_model,
                    &config.user_agent,
                    &config.completion_base_url,
                )
            })
            .transpose()
            .map_err(AggregatorError::ClientSetup)?;

        if search.is_none() {
            tracing::warn!("{SEARCH_KEY_VAR} not set; dossier requests will fail");
        }
        if completion.is_none() {
            tracing::warn!("{COMPLETION_KEY_VAR} not set; dossier requests will fail");
        }

        Ok(Self {
            search,
            completion,
            strict_schema: config.strict_schema,
        })
    }

    /// Produces a dossier for `address`.
    ///
    /// 1. Validate the address and credentials (no network before this passes).
    /// 2. Fan the three search queries out; failed queries count as empty.
    /// 3. Number the hits and build the context blob.
    /// 4. Ask the completion endpoint for a JSON dossier.
    /// 5. Parse it and attach up to five real sources.
    ///
    /// Zero search hits is not fatal: the model is still asked, with an
    /// empty context.
    ///
    /// # Errors
    ///
    /// Returns [`AggregatorError`] for an empty address, a missing credential,
    /// a failed completion call, or model output that cannot be finalized.
    pub async fn analyze(&self, address: &str) -> Result<Value, AggregatorError> {
        if address.trim().is_empty() {
            return Err(AggregatorError::MissingAddress);
        }
        let search = self
            .search
            .as_ref()
            .ok_or(AggregatorError::MissingCredential(SEARCH_KEY_VAR))?;
        let completion = self
            .completion
            .as_ref()
            .ok_or(AggregatorError::MissingCredential(COMPLETION_KEY_VAR))?;

        tracing::info!(address, "analyzing property");

        let queries = build_queries(address);
        let result_sets = fan_out(search, &queries).await;
        let context = assemble_context(&result_sets);

        tracing::info!(
            address,
            source_count = context.sources.len(),
            model = completion.model(),
            "collected sources; requesting dossier"
        );

        let messages = build_messages(address, &context.raw_context);
        let response = completion
            .complete(&messages, true)
            .await
            .map_err(AggregatorError::Completion)?;

        let dossier = finalize_dossier(&response, &context.sources, self.strict_schema)?;

        tracing::info!(address, "dossier generated");
        Ok(dossier)
    }
}
