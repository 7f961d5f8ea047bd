// src/config.rs
use std::time::Duration;

use crate::error::WidgetError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const CHAT_PATH: &str = "/api/chat";
pub const HEALTH_PATH: &str = "/api/health";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const FALLBACK_REPLY: &str = "No response received";

const BASIC_GREETING: &str = "Hello! How can I help you today?";
const FULL_GREETING: &str = "Welcome! 🙏

I'm here to help you find answers that relate to your questions and challenges.

Try asking:
• \"I feel anxious\"
• \"How do I find peace?\"
• \"What should I do when facing difficulty?\"
• \"How can I manage work and life balance?\"

Ask your question and I'll share what I find.";

/// The two historical widget flavours, kept as presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Basic,
    Full,
}

impl std::str::FromStr for Variant {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Variant::Basic),
            "full" => Ok(Variant::Full),
            other => Err(WidgetError::Config(format!("unknown variant `{other}`"))),
        }
    }
}

/// Which Enter presses submit the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitKey {
    AnyEnter,
    /// Shift+Enter is left to the view (e.g. a newline).
    EnterWithoutShift,
}

/// Identifiers the widget expects the view to expose.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementIds {
    pub input: String,
    pub send: String,
    pub messages: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            input: "user-input".to_string(),
            send: "send-btn".to_string(),
            messages: "chat-messages".to_string(),
        }
    }
}

impl ElementIds {
    pub fn all(&self) -> [&str; 3] {
        [&self.input, &self.send, &self.messages]
    }
}

#[derive(Clone, Debug)]
pub struct WidgetConfig {
    pub base_url: String,
    pub elements: ElementIds,
    pub show_loading: bool,
    pub disable_send_while_pending: bool,
    /// Reject a send while another is in flight. When off, overlapping
    /// requests share one pending entry, which stays until the last of them
    /// resolves; replies land in arrival order.
    pub single_flight: bool,
    pub error_detail: bool,
    pub submit_key: SubmitKey,
    pub greeting: Option<String>,
    pub pending_text: String,
    pub fallback_reply: String,
    pub request_timeout: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl WidgetConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Basic => Self::basic(),
            Variant::Full => Self::full(),
        }
    }

    /// Plain widget: no loading entry, send control always enabled.
    pub fn basic() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            elements: ElementIds::default(),
            show_loading: false,
            disable_send_while_pending: false,
            single_flight: true,
            error_detail: false,
            submit_key: SubmitKey::AnyEnter,
            greeting: Some(BASIC_GREETING.to_string()),
            pending_text: "🔍 Searching...".to_string(),
            fallback_reply: FALLBACK_REPLY.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn full() -> Self {
        Self {
            show_loading: true,
            disable_send_while_pending: true,
            error_detail: true,
            submit_key: SubmitKey::EnterWithoutShift,
            greeting: Some(FULL_GREETING.to_string()),
            pending_text: "🔍 Searching for relevant answers...".to_string(),
            ..Self::basic()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_single_flight(mut self, single_flight: bool) -> Self {
        self.single_flight = single_flight;
        self
    }

    pub fn with_greeting(mut self, greeting: Option<&str>) -> Self {
        self.greeting = greeting.map(str::to_string);
        self
    }

    pub fn chat_url(&self) -> String {
        format!("{}{CHAT_PATH}", self.base_url.trim_end_matches('/'))
    }

    pub fn health_url(&self) -> String {
        format!("{}{HEALTH_PATH}", self.base_url.trim_end_matches('/'))
    }

    /// Load `.env` (if any) and read the `CHAT_WIDGET_*` variables.
    pub fn from_env() -> Result<Self, WidgetError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, WidgetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let variant = match lookup("CHAT_WIDGET_VARIANT") {
            Some(v) => v.parse()?,
            None => Variant::Full,
        };
        let mut config = Self::for_variant(variant);

        if let Some(url) = lookup("CHAT_WIDGET_BASE_URL") {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(WidgetError::Config(format!(
                    "CHAT_WIDGET_BASE_URL must be an http(s) URL, got `{url}`"
                )));
            }
            config.base_url = url.to_string();
        }

        if let Some(secs) = lookup("CHAT_WIDGET_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                WidgetError::Config(format!("CHAT_WIDGET_TIMEOUT_SECS is not a number: `{secs}`"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(flag) = lookup("CHAT_WIDGET_SINGLE_FLIGHT") {
            config.single_flight = parse_bool("CHAT_WIDGET_SINGLE_FLIGHT", &flag)?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, WidgetError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(WidgetError::Config(format!("{key} expects a boolean, got `{other}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn presets_differ_only_in_polish() {
        let basic = WidgetConfig::basic();
        let full = WidgetConfig::full();
        assert!(!basic.show_loading && full.show_loading);
        assert!(!basic.disable_send_while_pending && full.disable_send_while_pending);
        assert_eq!(basic.submit_key, SubmitKey::AnyEnter);
        assert_eq!(full.submit_key, SubmitKey::EnterWithoutShift);
        assert_eq!(basic.base_url, full.base_url);
        assert_eq!(basic.fallback_reply, full.fallback_reply);
        assert!(basic.single_flight && full.single_flight);
    }

    #[test]
    fn urls_join_without_double_slash() {
        let config = WidgetConfig::basic().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.chat_url(), "http://127.0.0.1:8080/api/chat");
        assert_eq!(config.health_url(), "http://127.0.0.1:8080/api/health");
    }

    #[test]
    fn empty_lookup_yields_full_preset() {
        let config = WidgetConfig::from_lookup(|_| None).unwrap();
        assert!(config.show_loading);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn lookup_overrides_fields() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            ("CHAT_WIDGET_VARIANT", "basic"),
            ("CHAT_WIDGET_BASE_URL", "https://chat.example.org"),
            ("CHAT_WIDGET_TIMEOUT_SECS", "5"),
            ("CHAT_WIDGET_SINGLE_FLIGHT", "off"),
        ]))
        .unwrap();
        assert!(!config.show_loading);
        assert_eq!(config.base_url, "https://chat.example.org");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(!config.single_flight);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for pairs in [
            [("CHAT_WIDGET_VARIANT", "fancy")],
            [("CHAT_WIDGET_BASE_URL", "localhost:5000")],
            [("CHAT_WIDGET_TIMEOUT_SECS", "soon")],
            [("CHAT_WIDGET_SINGLE_FLIGHT", "maybe")],
        ] {
            let err = WidgetConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(matches!(err, WidgetError::Config(_)), "{pairs:?} gave {err:?}");
        }
    }
}
