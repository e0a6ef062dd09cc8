use serde_json::Value;
use std::collections::BTreeSet;
use tracing::warn;

use crate::data::gamma_api::{GammaMarket, GammaToken};
use crate::normalizer::decode::{decode_embedded, label_of};
use crate::normalizer::prices::price_entry_count;

/// Resolve the ordered answer options of a market.
///
/// First satisfied source wins:
/// 1. an explicit `outcomes` field (decoded if it is text)
/// 2. token outcome labels, deduplicated and sorted alphabetically
/// 3. `["Yes", "No"]` when there are exactly two prices
/// 4. `"Option 1"`.. `"Option N"` for N prices
pub fn resolve_answer_options(market: &GammaMarket) -> Vec<String> {
    if let Some(raw) = market.outcomes.as_ref() {
        return explicit_outcomes(raw);
    }

    let token_labels = token_outcomes(market.tokens());
    if !token_labels.is_empty() {
        return token_labels;
    }

    match price_entry_count(market) {
        2 => vec!["Yes".to_string(), "No".to_string()],
        n => (1..=n).map(|i| format!("Option {}", i)).collect(),
    }
}

fn explicit_outcomes(raw: &Value) -> Vec<String> {
    match decode_embedded(raw) {
        Ok(decoded) => match &*decoded {
            Value::Array(items) => items.iter().map(label_of).collect(),
            _ => {
                warn!("outcomes is not a list, using no answer options");
                Vec::new()
            }
        },
        Err(e) => {
            warn!(error = %e, "malformed outcomes text, using no answer options");
            Vec::new()
        }
    }
}

fn token_outcomes(tokens: &[GammaToken]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(|t| t.outcome.as_deref())
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn market(raw: Value) -> GammaMarket {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_two_prices_default_to_yes_no() {
        let m = market(json!({ "outcomePrices": ["0.7", "0.3"] }));
        assert_eq!(resolve_answer_options(&m), vec!["Yes", "No"]);
    }

    #[test]
    fn test_placeholder_labels() {
        let m = market(json!({ "outcomePrices": "[\"0.2\",\"0.3\",\"0.5\"]" }));
        assert_eq!(resolve_answer_options(&m), vec!["Option 1", "Option 2", "Option 3"]);
    }

    #[test]
    fn test_text_outcomes_are_decoded() {
        let m = market(json!({ "outcomes": "[\"A\",\"B\"]", "outcomePrices": ["0.1", "0.9"] }));
        assert_eq!(resolve_answer_options(&m), vec!["A", "B"]);
    }

    #[test]
    fn test_list_outcomes_used_directly() {
        let m = market(json!({ "outcomes": ["Over", "Under"] }));
        assert_eq!(resolve_answer_options(&m), vec!["Over", "Under"]);
    }

    #[test]
    fn test_malformed_outcomes_are_empty() {
        let m = market(json!({ "outcomes": "[\"A\",", "outcomePrices": ["0.1", "0.9"] }));
        assert!(resolve_answer_options(&m).is_empty());
    }

    #[test]
    fn test_token_labels_sorted_and_deduplicated() {
        let m = market(json!({
            "tokens": [
                { "tokenId": "1", "outcome": "Trump" },
                { "tokenId": "2", "outcome": "Harris" },
                { "tokenId": "3", "outcome": "" },
                { "tokenId": "4" },
                { "tokenId": "5", "outcome": "Harris" }
            ],
            "outcomePrices": ["0.6", "0.4"]
        }));
        assert_eq!(resolve_answer_options(&m), vec!["Harris", "Trump"]);
    }

    #[test]
    fn test_unlabelled_tokens_fall_through() {
        let m = market(json!({
            "tokens": [{ "tokenId": "1", "outcome": "" }],
            "outcomePrices": ["0.6", "0.4"]
        }));
        assert_eq!(resolve_answer_options(&m), vec!["Yes", "No"]);
    }

    #[test]
    fn test_no_information_at_all() {
        assert!(resolve_answer_options(&market(json!({}))).is_empty());
    }
}
