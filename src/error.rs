//! Error type shared by the particle core, the browser front end and the CLI

use thiserror::Error;

/// Errors surfaced by configuration loading and rendering surfaces
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("Draw failed: {0}")]
    Draw(String),

    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Host call failed: {0}")]
    Host(String),
}

pub type Result<T, E = FieldError> = std::result::Result<T, E>;

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for FieldError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FieldError::Host(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(feature = "wasm")]
impl From<FieldError> for wasm_bindgen::JsValue {
    fn from(err: FieldError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
