use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Listing endpoints of the Gamma API that can be filtered by slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Events,
    Markets,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Events => "events",
            Endpoint::Markets => "markets",
        }
    }
}

/// Something that can answer "list open records with this slug".
#[async_trait]
pub trait GammaSource {
    /// Returns the raw records, or an empty list when the upstream has none
    /// (including non-success statuses).
    async fn list_by_slug(&self, endpoint: Endpoint, slug: &str) -> Result<Vec<Value>, GammaError>;
}

pub struct GammaApiClient {
    client: Client,
    base_url: String,
}

/// Event as returned by `GET /events`.
///
/// Only `id` and `title` are typed strictly; any other field with an
/// unexpected JSON type reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaEvent {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(default, rename = "liquidityUSD")]
    pub liquidity_usd: Option<Value>,
    #[serde(default, rename = "volumeUSD")]
    pub volume_usd: Option<Value>,
    #[serde(default)]
    pub markets: Option<Vec<GammaMarket>>,
}

/// Market as returned by `GET /markets` or embedded in an event.
///
/// `outcomes` and `outcomePrices` are kept as raw JSON: Gamma ships them as
/// lists, maps, or JSON documents inside a string depending on the record.
/// As with events, only `id` and `question` are typed strictly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_date: Option<String>,
    #[serde(default, rename = "liquidityUSD")]
    pub liquidity_usd: Option<Value>,
    #[serde(default, rename = "volumeUSD")]
    pub volume_usd: Option<Value>,
    #[serde(default)]
    pub outcomes: Option<Value>,
    #[serde(default)]
    pub outcome_prices: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub tokens: Option<Vec<GammaToken>>,
    #[serde(default, deserialize_with = "lenient")]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub closed: Option<bool>,
}

/// Token ids are passed through in whatever JSON type upstream used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaToken {
    #[serde(default)]
    pub token_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub outcome: Option<String>,
    #[serde(default)]
    pub clob_token_id: Option<Value>,
}

/// Read an optional field, treating a value of the wrong JSON type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            debug!(error = %e, "ignoring mistyped optional field");
            Ok(None)
        }
    }
}

impl GammaEvent {
    /// `imageUrl` wins over `image` when both are present.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().or(self.image.as_deref())
    }
}

impl GammaMarket {
    pub fn tokens(&self) -> &[GammaToken] {
        self.tokens.as_deref().unwrap_or_default()
    }
}

impl GammaApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, GammaError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl GammaSource for GammaApiClient {
    async fn list_by_slug(&self, endpoint: Endpoint, slug: &str) -> Result<Vec<Value>, GammaError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());
        debug!(%url, slug, "querying gamma");

        let response = self
            .client
            .get(&url)
            .query(&[("slug", slug), ("closed", "false"), ("archived", "false")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, endpoint = endpoint.path(), "non-success status, treating as empty");
            return Ok(Vec::new());
        }

        match response.json::<Value>().await? {
            Value::Array(records) => Ok(records),
            other => {
                debug!(kind = json_kind(&other), "response body is not a list, treating as empty");
                Ok(Vec::new())
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GammaError {
    #[error("Gamma API request failed: {0}")]
    Http(#[from] reqwest::Error),
}
