use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const INVALID_URL: &str = "Invalid Polymarket URL format";
pub const NOT_FOUND: &str = "No matching event or market found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Event,
    Market,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRecord {
    pub token_id: Option<Value>,
    pub outcome: Option<String>,
    pub clob_token_id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketRecord {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub id: String,
    pub question: String,
    pub end_date: Option<String>,
    pub answer_options: Vec<String>,
    /// Keyed by answer option. List-shaped upstream prices arrive here as
    /// floats; map-shaped ones keep whatever JSON type upstream used.
    pub current_prices: BTreeMap<String, Value>,
    pub liquidity: Option<Value>,
    pub volume: Option<Value>,
    pub tokens: Vec<TokenRecord>,
    pub active: bool,
    pub closed: bool,
    pub url: Option<String>,
}

impl MarketRecord {
    /// Price of `option` as a probability, 0.0 when unlisted or non-numeric.
    pub fn price_of(&self, option: &str) -> f64 {
        self.current_prices
            .get(option)
            .and_then(|price| match price {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            })
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub id: String,
    pub title: String,
    pub description: String,
    pub end_date: Option<String>,
    pub image: Option<String>,
    pub liquidity: Option<Value>,
    pub volume: Option<Value>,
    pub url: Option<String>,
    pub markets: Vec<MarketRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub error: String,
}

impl ErrorResult {
    pub fn invalid_url() -> Self {
        Self { error: INVALID_URL.to_string() }
    }

    pub fn not_found() -> Self {
        Self { error: NOT_FOUND.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    Event(EventRecord),
    Market(MarketRecord),
    Error(ErrorResult),
}

impl NormalizedResult {
    pub fn is_error(&self) -> bool {
        matches!(self, NormalizedResult::Error(_))
    }
}
