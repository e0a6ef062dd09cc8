use serde_json::Value;
use tracing::{debug, info};

use crate::data::gamma_api::{Endpoint, GammaEvent, GammaMarket, GammaSource};
use crate::data::types::{ErrorResult, NormalizedResult};
use crate::normalizer::format::{format_event, format_market};
use crate::normalizer::slug::extract_slug;
use crate::normalizer::NormalizeError;

/// Resolves a Polymarket URL to a normalized event or market.
pub struct MarketFetcher<S> {
    source: S,
    site_url: String,
}

impl<S: GammaSource> MarketFetcher<S> {
    pub fn new(source: S, site_url: String) -> Self {
        Self { source, site_url }
    }

    /// Fetch market/event data for a Polymarket URL.
    ///
    /// Unrecognised URLs and unknown slugs come back as
    /// [`NormalizedResult::Error`]; transport failures and records missing a
    /// required field are returned as `Err`.
    pub async fn fetch(&self, url: &str) -> Result<NormalizedResult, NormalizeError> {
        let Some(slug) = extract_slug(url) else {
            info!(url, "url does not contain an event or market slug");
            return Ok(NormalizedResult::Error(ErrorResult::invalid_url()));
        };

        self.fetch_slug(&slug).await
    }

    /// Events are tried first; markets only when no event matches.
    pub async fn fetch_slug(&self, slug: &str) -> Result<NormalizedResult, NormalizeError> {
        if let Some(raw) = self.first(Endpoint::Events, slug).await? {
            let event: GammaEvent = serde_json::from_value(raw).map_err(NormalizeError::Payload)?;
            return Ok(NormalizedResult::Event(format_event(&event, &self.site_url)?));
        }

        if let Some(raw) = self.first(Endpoint::Markets, slug).await? {
            let market: GammaMarket = serde_json::from_value(raw).map_err(NormalizeError::Payload)?;
            return Ok(NormalizedResult::Market(format_market(&market, &self.site_url)?));
        }

        info!(slug, "no event or market found");
        Ok(NormalizedResult::Error(ErrorResult::not_found()))
    }

    async fn first(&self, endpoint: Endpoint, slug: &str) -> Result<Option<Value>, NormalizeError> {
        let records = self.source.list_by_slug(endpoint, slug).await?;
        debug!(endpoint = endpoint.path(), count = records.len(), "gamma lookup");
        Ok(records.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::gamma_api::GammaError;
    use crate::data::types::NOT_FOUND;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Canned Gamma responses that remember which endpoints were hit.
    #[derive(Default)]
    struct StubSource {
        events: Vec<Value>,
        markets: Vec<Value>,
        calls: Mutex<Vec<(Endpoint, String)>>,
    }

    #[async_trait]
    impl GammaSource for StubSource {
        async fn list_by_slug(&self, endpoint: Endpoint, slug: &str) -> Result<Vec<Value>, GammaError> {
            self.calls.lock().unwrap().push((endpoint, slug.to_string()));
            Ok(match endpoint {
                Endpoint::Events => self.events.clone(),
                Endpoint::Markets => self.markets.clone(),
            })
        }
    }

    fn fetcher(source: StubSource) -> MarketFetcher<StubSource> {
        MarketFetcher::new(source, "https://polymarket.com".to_string())
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_calls() {
        let f = fetcher(StubSource::default());

        let result = f.fetch("https://polymarket.com/leaderboard").await.unwrap();

        assert_eq!(result, NormalizedResult::Error(ErrorResult::invalid_url()));
        assert!(f.source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_event_wins_without_market_lookup() {
        let f = fetcher(StubSource {
            events: vec![
                json!({ "id": "1", "title": "First", "slug": "us-recession" }),
                json!({ "id": "2", "title": "Second" }),
            ],
            markets: vec![json!({ "id": "3", "question": "Q?" })],
            ..Default::default()
        });

        let result = f.fetch("https://polymarket.com/event/us-recession").await.unwrap();

        match result {
            NormalizedResult::Event(event) => assert_eq!(event.title, "First"),
            other => panic!("expected event, got {:?}", other),
        }
        assert_eq!(
            *f.source.calls.lock().unwrap(),
            vec![(Endpoint::Events, "us-recession".to_string())]
        );
    }

    #[tokio::test]
    async fn test_falls_back_to_markets() {
        let f = fetcher(StubSource {
            markets: vec![json!({
                "id": "3",
                "question": "Will it snow?",
                "outcomePrices": "[\"0.7\",\"0.3\"]"
            })],
            ..Default::default()
        });

        let result = f.fetch("https://polymarket.com/market/will-it-snow").await.unwrap();

        let NormalizedResult::Market(market) = result else {
            panic!("expected market");
        };
        assert_eq!(market.answer_options, vec!["Yes", "No"]);
        assert_eq!(market.current_prices["Yes"], json!(0.7));
        assert_eq!(market.current_prices["No"], json!(0.3));
        assert_eq!(f.source.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_not_found() {
        let f = fetcher(StubSource::default());

        let result = f.fetch("https://polymarket.com/event/nothing-here").await.unwrap();

        assert_eq!(serde_json::to_value(&result).unwrap(), json!({ "error": NOT_FOUND }));
    }

    #[tokio::test]
    async fn test_missing_required_field_is_an_error() {
        let f = fetcher(StubSource {
            markets: vec![json!({ "question": "No id" })],
            ..Default::default()
        });

        let err = f.fetch("https://polymarket.com/market/no-id").await.unwrap_err();
        assert!(matches!(err, NormalizeError::MissingField { field: "id", .. }));
    }

    #[tokio::test]
    async fn test_wrongly_typed_record_is_a_payload_error() {
        let f = fetcher(StubSource {
            events: vec![json!({ "id": "1", "title": ["not", "text"] })],
            ..Default::default()
        });

        let err = f.fetch("https://polymarket.com/event/weird").await.unwrap_err();
        assert!(matches!(err, NormalizeError::Payload(_)));
    }

    #[tokio::test]
    async fn test_event_with_both_image_fields() {
        let f = fetcher(StubSource {
            events: vec![json!({ "id": "1", "title": "T", "image": "a.png", "imageUrl": "b.png" })],
            ..Default::default()
        });

        let result = f.fetch("https://polymarket.com/event/pictured").await.unwrap();

        let NormalizedResult::Event(event) = result else {
            panic!("expected event");
        };
        assert_eq!(event.image.as_deref(), Some("b.png"));
    }

    #[tokio::test]
    async fn test_numeric_token_ids_pass_through() {
        let f = fetcher(StubSource {
            markets: vec![json!({
                "id": "3",
                "question": "Q?",
                "tokens": [{ "tokenId": 123, "outcome": "Yes", "clobTokenId": 456 }]
            })],
            ..Default::default()
        });

        let result = f.fetch("https://polymarket.com/market/numeric-tokens").await.unwrap();

        let NormalizedResult::Market(market) = result else {
            panic!("expected market");
        };
        assert_eq!(market.tokens[0].token_id, Some(json!(123)));
        assert_eq!(market.tokens[0].clob_token_id, Some(json!(456)));
        assert_eq!(market.answer_options, vec!["Yes"]);
    }

    #[tokio::test]
    async fn test_mistyped_optional_fields_do_not_abort() {
        let f = fetcher(StubSource {
            markets: vec![json!({
                "id": "3",
                "question": "Q?",
                "active": "true",
                "closed": 1,
                "endDate": 20241231,
                "slug": ["x"]
            })],
            ..Default::default()
        });

        let result = f.fetch("https://polymarket.com/market/sloppy").await.unwrap();

        let NormalizedResult::Market(market) = result else {
            panic!("expected market");
        };
        assert!(!market.active);
        assert!(!market.closed);
        assert_eq!(market.end_date, None);
        assert_eq!(market.url, None);
    }
}
