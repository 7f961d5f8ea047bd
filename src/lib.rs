// src/lib.rs
pub mod config;
pub mod error;
pub mod message;
pub mod services;
pub mod view;

pub use config::{Variant, WidgetConfig};
pub use error::WidgetError;
pub use services::client::{ChatClient, HttpChatClient};
pub use services::widget::{ChatWidget, RequestState, SendOutcome, WidgetEvent};
