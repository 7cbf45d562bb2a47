//! Flattens fanned-out search hits into the LLM context blob and the
//! matching numbered source list.

use dossier_core::SourceEntry;
use dossier_upstream::SearchResult;

/// Characters of each result's content kept in its snippet.
pub const SNIPPET_CHAR_BUDGET: usize = 500;

/// Placed between snippets in the context blob.
pub const SNIPPET_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledContext {
    pub raw_context: String,
    /// Same order and numbering as the `[n]` markers in `raw_context`.
    pub sources: Vec<SourceEntry>,
}

/// Numbers every hit from 1 across all result sets (set order first, then
/// order within the set) and renders one snippet per hit.
///
/// Empty input yields an empty context and no sources.
#[must_use]
pub fn assemble_context(result_sets: &[Vec<SearchResult>]) -> AssembledContext {
    let mut snippets = Vec::new();
    let mut sources = Vec::new();

    for (id, result) in (1..).zip(result_sets.iter().flatten()) {
        snippets.push(format!(
            "[{id}] Source: {}\nContent: {}",
            result.title,
            truncate_chars(&result.content, SNIPPET_CHAR_BUDGET)
        ));
        sources.push(SourceEntry {
            id,
            title: result.title.clone(),
            url: result.url.clone(),
        });
    }

    AssembledContext {
        raw_context: snippets.join(SNIPPET_SEPARATOR),
        sources,
    }
}

/// Hard cut after `max` chars, ignoring word boundaries.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, content: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
            content: content.to_string(),
        }
    }

    #[test]
    fn ids_run_across_all_sets() {
        let sets = vec![
            vec![hit("Sale A", "sold"), hit("Sale B", "sold again")],
            vec![hit("Permit A", "approved")],
            vec![],
        ];
        let ctx = assemble_context(&sets);

        let ids: Vec<usize> = ctx.sources.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(ctx.sources[2].title, "Permit A");
        assert_eq!(ctx.raw_context.matches(SNIPPET_SEPARATOR).count(), 2);
        assert!(ctx.raw_context.starts_with("[1] Source: Sale A\nContent: sold"));
        assert!(ctx.raw_context.ends_with("[3] Source: Permit A\nContent: approved"));
    }

    #[test]
    fn ids_skip_nothing_when_first_sets_are_empty() {
        let sets = vec![vec![], vec![], vec![hit("Trend", "x"), hit("Trend 2", "y")]];
        let ctx = assemble_context(&sets);
        let ids: Vec<usize> = ctx.sources.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn empty_sets_produce_empty_context() {
        let ctx = assemble_context(&[vec![], vec![], vec![]]);
        assert!(ctx.raw_context.is_empty());
        assert!(ctx.sources.is_empty());
    }

    #[test]
    fn content_is_cut_at_budget() {
        let long = "a".repeat(SNIPPET_CHAR_BUDGET + 50);
        let ctx = assemble_context(&[vec![hit("Long", &long)]]);
        let content = ctx
            .raw_context
            .split_once("Content: ")
            .map(|(_, c)| c)
            .expect("snippet has content");
        assert_eq!(content.len(), SNIPPET_CHAR_BUDGET);
    }

    #[test]
    fn truncate_chars_respects_multibyte_boundaries() {
        let text = "£".repeat(10);
        let cut = truncate_chars(&text, 4);
        assert_eq!(cut.chars().count(), 4);
        assert_eq!(cut, "££££");
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn duplicate_urls_are_kept() {
        let sets = vec![vec![hit("Same", "one")], vec![hit("Same", "two")]];
        let ctx = assemble_context(&sets);
        assert_eq!(ctx.sources.len(), 2);
        assert_eq!(ctx.sources[0].url, ctx.sources[1].url);
    }
}
