//! Turns Polymarket URLs into normalized event/market records.

pub mod decode;
pub mod fetcher;
pub mod format;
pub mod outcomes;
pub mod prices;
pub mod slug;

pub use fetcher::MarketFetcher;
pub use slug::extract_slug;

use crate::data::gamma_api::GammaError;

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("{record} is missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("Unexpected Gamma record shape: {0}")]
    Payload(serde_json::Error),

    #[error(transparent)]
    Gamma(#[from] GammaError),
}
