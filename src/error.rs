// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("failed to load property catalog: {0}")]
    Catalog(#[from] serde_json::Error),
    #[error("unknown property slug: {0}")]
    UnknownSlug(String),
    #[error("no booking id for slug: {0}")]
    NoBookingId(String),
    #[error("booking API key not configured")]
    NoApiKey,
    #[error("request failed: {0}")]
    Http(String),
    #[error("booking API returned status {0}")]
    Status(u16),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<gloo_net::Error> for SiteError {
    fn from(err: gloo_net::Error) -> Self {
        SiteError::Http(err.to_string())
    }
}

impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SiteError::Js(format!("{:?}", value))
    }
}
