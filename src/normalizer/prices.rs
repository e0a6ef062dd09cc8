use serde_json::{Number, Value};
use std::collections::BTreeMap;
use tracing::warn;

use crate::data::gamma_api::GammaMarket;
use crate::normalizer::decode::decode_embedded;
use crate::normalizer::outcomes::resolve_answer_options;

/// Normalize `outcomePrices` into a label → price map, resolving the answer
/// options from the same record.
pub fn normalize_prices(market: &GammaMarket) -> BTreeMap<String, Value> {
    let options = resolve_answer_options(market);
    normalize_prices_with(market, &options)
}

/// Same as [`normalize_prices`] with options already resolved for `market`.
pub(crate) fn normalize_prices_with(market: &GammaMarket, options: &[String]) -> BTreeMap<String, Value> {
    let Some(raw) = market.outcome_prices.as_ref() else {
        return BTreeMap::new();
    };

    let decoded = match decode_embedded(raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(error = %e, "malformed outcomePrices text, using no prices");
            return BTreeMap::new();
        }
    };

    match &*decoded {
        Value::Array(prices) => options
            .iter()
            .zip(prices)
            .filter(|(label, _)| !label.is_empty())
            .filter_map(|(label, price)| match coerce_price(price) {
                Some(p) => Some((label.clone(), p)),
                None => {
                    warn!(%label, %price, "price is not numeric, skipping");
                    None
                }
            })
            .collect(),
        // Map-shaped prices are passed through untouched.
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        _ => BTreeMap::new(),
    }
}

/// Number of price entries in the raw record, 0 when absent or undecodable.
pub(crate) fn price_entry_count(market: &GammaMarket) -> usize {
    let Some(raw) = market.outcome_prices.as_ref() else {
        return 0;
    };

    match decode_embedded(raw) {
        Ok(decoded) => match &*decoded {
            Value::Array(prices) => prices.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        },
        Err(_) => 0,
    }
}

fn coerce_price(price: &Value) -> Option<Value> {
    let p = match price {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Number::from_f64(p).map(Value::Number)
}
