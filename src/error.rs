//! Typed errors for the extraction pipeline and startup configuration

use thiserror::Error;

/// Fatal extraction failure: no listing cards can be located at all
#[derive(Error, Debug, PartialEq)]
pub enum ExtractError {
    #[error("listing container `{0}` not found in page markup")]
    MissingContainer(&'static str),
}

/// Why a single field could not be derived from a listing card.
///
/// These never escape the extractor; the field is left absent instead.
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("no element matching `{0}`")]
    MissingElement(&'static str),

    #[error("element `{element}` has no `{attribute}` attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("last child of `{0}` is not text")]
    NotText(&'static str),

    #[error("malformed tracking data: {0}")]
    Tracking(#[from] serde_json::Error),

    #[error("tracking data has no numeric `{0}`")]
    TrackingKey(&'static str),

    #[error("no currency amount in {0:?}")]
    NoPrice(String),

    #[error("not an integer: {0:?}")]
    NotInteger(String),
}

/// Startup configuration problems
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("required setting `{0}` is empty")]
    Empty(&'static str),

    #[error("`{0}` is required when DISCORD_ENABLED is set")]
    MissingDiscord(&'static str),

    #[error("ANNOUNCE_INTERVAL_HOURS must be at least 1")]
    ZeroInterval,
}
