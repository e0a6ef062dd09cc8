use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::data::types::{EventRecord, MarketRecord, NormalizedResult};

/// JSON output: keys sorted, two-space indent.
pub fn to_pretty_json(result: &NormalizedResult) -> serde_json::Result<String> {
    // Round-tripping through `Value` sorts object keys.
    let value = serde_json::to_value(result)?;
    serde_json::to_string_pretty(&value)
}

/// Everything the CLI writes to stdout: the JSON, then the text rendering
/// when `with_text` is set. Error results only ever produce the JSON.
pub fn render_output(result: &NormalizedResult, with_text: bool) -> serde_json::Result<String> {
    let mut out = to_pretty_json(result)?;
    out.push('\n');

    if with_text && !result.is_error() {
        out.push('\n');
        out.push_str(&render_text(result));
    }

    Ok(out)
}

/// Human-readable rendering of a normalized result.
pub fn render_text(result: &NormalizedResult) -> String {
    match result {
        NormalizedResult::Error(err) => err.error.clone(),
        NormalizedResult::Event(event) => render_event(event),
        NormalizedResult::Market(market) => render_market(market),
    }
}

fn render_event(event: &EventRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Event: {}", event.title);
    let _ = writeln!(out, "Ends: {}", display_date(event.end_date.as_deref()));

    for market in &event.markets {
        out.push('\n');
        out.push_str(&render_market(market));
    }

    out
}

fn render_market(market: &MarketRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Market: {}", market.question);
    let _ = writeln!(out, "Ends: {}", display_date(market.end_date.as_deref()));

    for option in &market.answer_options {
        let _ = writeln!(out, "  {}: {:.1}%", option, market.price_of(option) * 100.0);
    }

    out
}

fn display_date(end_date: Option<&str>) -> String {
    match end_date {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "N/A".to_string(),
    }
}
