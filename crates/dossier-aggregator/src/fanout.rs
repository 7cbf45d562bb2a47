//! Query fanout: three fixed searches per address, issued concurrently.

use dossier_upstream::{SearchClient, SearchResult};
use futures::future::join_all;

/// Hits requested from the search API per query.
pub const MAX_RESULTS_PER_QUERY: usize = 3;

/// Builds the sale-history, permits and neighborhood queries, in that order.
/// The address is substituted verbatim.
#[must_use]
pub fn build_queries(address: &str) -> [String; 3] {
    [
        format!("real estate history, last sale price, property value for {address}"),
        format!("building permits, permit history, inspection records for {address}"),
        format!("neighborhood trends, recent renovations, common improvements near {address}"),
    ]
}

/// Runs every query concurrently and waits for all of them.
///
/// A query that fails for any reason contributes an empty result set; the
/// remaining queries are unaffected. Output order matches `queries`.
pub async fn fan_out(client: &SearchClient, queries: &[String]) -> Vec<Vec<SearchResult>> {
    let branches = queries.iter().enumerate().map(|(query_index, query)| async move {
        match client.search(query, MAX_RESULTS_PER_QUERY).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(
                    query_index,
                    error = %e,
                    "search query failed; continuing without its results"
                );
                Vec::new()
            }
        }
    });

    join_all(branches).await
}
