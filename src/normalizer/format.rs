use serde_json::Value;
use tracing::warn;

use crate::data::gamma_api::{GammaEvent, GammaMarket};
use crate::data::types::{EventRecord, MarketRecord, RecordKind, TokenRecord};
use crate::normalizer::outcomes::resolve_answer_options;
use crate::normalizer::prices::normalize_prices_with;
use crate::normalizer::NormalizeError;

/// Map a raw Gamma market into a [`MarketRecord`].
///
/// `id` and `question` are required; everything else degrades to empty.
pub fn format_market(market: &GammaMarket, site_url: &str) -> Result<MarketRecord, NormalizeError> {
    let id = required_id(market.id.as_ref(), "market")?;
    let question = market
        .question
        .clone()
        .ok_or(NormalizeError::MissingField { record: "market", field: "question" })?;

    let answer_options = resolve_answer_options(market);
    let mut current_prices = normalize_prices_with(market, &answer_options);

    // Every priced label must be an answer option.
    current_prices.retain(|label, _| {
        let known = answer_options.contains(label);
        if !known {
            warn!(market = %id, %label, "dropping price for unknown answer option");
        }
        known
    });

    let tokens = market
        .tokens()
        .iter()
        .map(|t| TokenRecord {
            token_id: t.token_id.clone(),
            outcome: t.outcome.clone(),
            clob_token_id: t.clob_token_id.clone(),
        })
        .collect();

    Ok(MarketRecord {
        kind: RecordKind::Market,
        url: page_url(site_url, "market", market.slug.as_deref()),
        id,
        question,
        end_date: market.end_date.clone(),
        answer_options,
        current_prices,
        liquidity: market.liquidity_usd.clone(),
        volume: market.volume_usd.clone(),
        tokens,
        active: market.active.unwrap_or(false),
        closed: market.closed.unwrap_or(false),
    })
}

/// Map a raw Gamma event, and every market embedded in it, into an
/// [`EventRecord`].
pub fn format_event(event: &GammaEvent, site_url: &str) -> Result<EventRecord, NormalizeError> {
    let id = required_id(event.id.as_ref(), "event")?;
    let title = event
        .title
        .clone()
        .ok_or(NormalizeError::MissingField { record: "event", field: "title" })?;

    let markets = event
        .markets
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|m| format_market(m, site_url))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EventRecord {
        kind: RecordKind::Event,
        url: page_url(site_url, "event", event.slug.as_deref()),
        id,
        title,
        description: event.description.clone().unwrap_or_default(),
        end_date: event.end_date.clone(),
        image: event.image().map(str::to_string),
        liquidity: event.liquidity_usd.clone(),
        volume: event.volume_usd.clone(),
        markets,
    })
}

fn required_id(id: Option<&Value>, record: &'static str) -> Result<String, NormalizeError> {
    match id {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(NormalizeError::MissingField { record, field: "id" }),
        Some(other) => Ok(other.to_string()),
    }
}

fn page_url(site_url: &str, route: &str, slug: Option<&str>) -> Option<String> {
    slug.map(|slug| format!("{}/{}/{}", site_url.trim_end_matches('/'), route, slug))
}
