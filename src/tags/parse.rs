use serde_json::Value;
use tracing::warn;

/// Pull tags out of raw model output.
///
/// Tries, in order: the JSON array spanning the first `[` to the last `]`;
/// when there is no such span, comma-separated text; when the span is not
/// valid JSON, words longer than three characters (at most `max_tags`).
/// `prompt` is stripped from the output before the text fallbacks run.
pub fn parse_tags(response: &str, prompt: &str, max_tags: usize) -> Vec<String> {
    match bracketed(response) {
        Some(candidate) => match serde_json::from_str::<Vec<Value>>(candidate) {
            Ok(items) => items.iter().map(tag_of).collect(),
            Err(e) => {
                warn!(error = %e, "model output has a malformed JSON array, falling back to words");
                word_tags(&strip_prompt(response, prompt), max_tags)
            }
        },
        None => comma_tags(&strip_prompt(response, prompt)),
    }
}

fn bracketed(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')? + 1;
    (end > start).then(|| &text[start..end])
}

fn strip_prompt(response: &str, prompt: &str) -> String {
    if prompt.is_empty() {
        return response.trim().to_string();
    }
    response.replace(prompt, "").trim().to_string()
}

fn comma_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn word_tags(text: &str, max_tags: usize) -> Vec<String> {
    text.split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .take(max_tags)
        .map(str::to_string)
        .collect()
}

fn tag_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array_inside_chatter() {
        let tags = parse_tags(
            "Sure! Here are the tags:\n[\"Federal Reserve\", \"interest rates\", \"Powell\"]\nHope that helps.",
            "",
            30,
        );
        assert_eq!(tags, vec!["Federal Reserve", "interest rates", "Powell"]);
    }

    #[test]
    fn test_json_array_is_not_capped() {
        let items: Vec<String> = (0..40).map(|i| format!("\"t{}\"", i)).collect();
        let tags = parse_tags(&format!("[{}]", items.join(",")), "", 30);
        assert_eq!(tags.len(), 40);
    }

    #[test]
    fn test_non_string_elements_are_stringified() {
        assert_eq!(parse_tags("[\"2024\", 2025]", "", 30), vec!["2024", "2025"]);
    }

    #[test]
    fn test_comma_fallback_strips_prompt() {
        let prompt = "PROMPT: tag this";
        let tags = parse_tags("PROMPT: tag this  bitcoin, ETF approval , , SEC ", prompt, 30);
        assert_eq!(tags, vec!["bitcoin", "ETF approval", "SEC"]);
    }

    #[test]
    fn test_closing_bracket_before_opening_uses_commas() {
        assert_eq!(parse_tags("a] b, [c", "", 30), vec!["a] b", "[c"]);
    }

    #[test]
    fn test_malformed_array_falls_back_to_long_words() {
        let tags = parse_tags("[\"Ukraine\", \"NATO\", ceasefire talks in the news]", "", 30);
        assert_eq!(tags, vec!["[\"Ukraine\",", "\"NATO\",", "ceasefire", "talks", "news]"]);
    }

    #[test]
    fn test_word_fallback_is_capped() {
        let body: Vec<String> = (0..50).map(|i| format!("word{}", i)).collect();
        let tags = parse_tags(&format!("[oops {}]", body.join(" ")), "", 30);
        assert_eq!(tags.len(), 30);
        assert_eq!(tags[0], "[oops");
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_tags("", "", 30).is_empty());
        assert!(parse_tags("   ", "", 30).is_empty());
    }
}
