//! The two-message exchange sent to the completion endpoint.

use dossier_upstream::ChatMessage;

/// Fixed instruction describing how to read the search data and the exact
/// JSON shape to return.
pub const SYSTEM_PROMPT: &str = r#"You are a property intelligence analyst preparing briefings for building contractors.

Turn the numbered search results you are given into one structured JSON dossier.

Rules:
1. Use the last recorded sale price to pick "budget_tier":
   - Economy: under $200k
   - Standard: $200k to $400k
   - Premium: $400k to $700k
   - Luxury: over $700k
2. Set "risk_score" from 0 (no concerns) to 100 (severe concerns), weighing building age, permit history, neighborhood issues and structural signals.
3. Write 3 to 4 "intel" points, each in one of these categories:
   - Financial: sale history, property value, owner budget signals
   - Technical: building age, known defects, structural concerns
   - Neighborhood: renovation trends, local regulations, approval climate
   - Permits: approval times, open permits, common inspection failures
   Give every point an "icon" from exactly this set: "DollarSign", "AlertTriangle", "MapPin", "FileCheck", "Clock".
   When a point comes from a numbered source, put that source's URL in "source_url".
4. Write "talk_track": a single opening sentence the contractor can say to the homeowner.
5. Respond with ONLY valid JSON in exactly this shape:

{
  "address": "string",
  "summary": {
    "headline": "string (short, punchy title)",
    "risk_score": number (0-100),
    "budget_tier": "Economy" | "Standard" | "Premium" | "Luxury",
    "reasoning": "string (why this risk score)"
  },
  "intel": [
    {
      "category": "Financial" | "Technical" | "Neighborhood" | "Permits",
      "icon": "DollarSign" | "AlertTriangle" | "MapPin" | "FileCheck" | "Clock",
      "fact": "string (concrete data point)",
      "strategy": "string (tactical advice for the contractor)",
      "source_url": "string (optional)"
    }
  ],
  "talk_track": "string",
  "raw_sources": []
}

Prefer intelligence the contractor can act on: pricing the quote, anticipating problems, building rapport, and navigating local rules."#;

/// Builds the system and user messages for one address.
///
/// `raw_context` may be empty; the model is still asked for a dossier.
#[must_use]
pub fn build_messages(address: &str, raw_context: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(user_message(address, raw_context)),
    ]
}

fn user_message(address: &str, raw_context: &str) -> String {
    format!(
        "Analyze this property: {address}\n\nSearch Data:\n{raw_context}\n\nReturn ONLY the JSON dossier."
    )
}

#[cfg(test)]
mod tests {
    use dossier_core::{IntelCategory, IntelIcon};
    use dossier_upstream::ChatRole;

    use super::*;

    #[test]
    fn system_prompt_lists_every_category_and_icon() {
        for category in IntelCategory::ALL {
            assert!(
                SYSTEM_PROMPT.contains(category.as_str()),
                "missing category {}",
                category.as_str()
            );
        }
        for icon in IntelIcon::ALL {
            assert!(
                SYSTEM_PROMPT.contains(&format!("\"{}\"", icon.as_str())),
                "missing icon {}",
                icon.as_str()
            );
        }
    }

    #[test]
    fn system_prompt_states_budget_thresholds() {
        for needle in [
            "Economy: under $200k",
            "Standard: $200k to $400k",
            "Premium: $400k to $700k",
            "Luxury: over $700k",
        ] {
            assert!(SYSTEM_PROMPT.contains(needle), "missing threshold {needle}");
        }
    }

    #[test]
    fn messages_are_system_then_user() {
        let messages = build_messages("1 High Street, Bath", "[1] Source: x\nContent: y");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(
            messages[1].content,
            "Analyze this property: 1 High Street, Bath\n\nSearch Data:\n[1] Source: x\nContent: y\n\nReturn ONLY the JSON dossier."
        );
    }

    #[test]
    fn empty_context_still_builds_user_message() {
        let messages = build_messages("1 High Street, Bath", "");
        assert!(messages[1].content.contains("Search Data:\n\n\nReturn ONLY"));
    }
}
