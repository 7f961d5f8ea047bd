// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("invalid response body: {0}")]
    Payload(String),

    #[error("required element `{0}` is missing from the view")]
    MissingElement(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for WidgetError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WidgetError::Payload(err.to_string())
        } else if let Some(status) = err.status() {
            WidgetError::HttpStatus(status.as_u16())
        } else {
            WidgetError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WidgetError {
    fn from(err: serde_json::Error) -> Self {
        WidgetError::Payload(err.to_string())
    }
}
