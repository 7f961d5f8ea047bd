// src/view/mod.rs
pub mod headless;
pub mod terminal;

pub use headless::HeadlessView;
pub use terminal::TerminalView;

use crate::message::{Message, Sender};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Message(Sender),
    /// Transient "searching" placeholder.
    Pending,
}

/// One rendered line of the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub text: String,
    pub marker: Option<String>,
}

impl TranscriptEntry {
    pub fn message(message: Message) -> Self {
        Self {
            kind: EntryKind::Message(message.sender),
            text: message.text,
            marker: None,
        }
    }

    pub fn pending(text: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Pending,
            text: text.into(),
            marker: Some(marker.into()),
        }
    }

    pub fn classes(&self) -> &'static str {
        match self.kind {
            EntryKind::Message(sender) => sender.css_class(),
            EntryKind::Pending => "bot-message loading",
        }
    }

    pub fn is_pending(&self) -> bool {
        self.kind == EntryKind::Pending
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.marker.as_deref() == Some(marker)
    }

    pub fn as_message(&self) -> Option<Message> {
        match self.kind {
            EntryKind::Message(sender) => Some(Message::new(self.text.clone(), sender)),
            EntryKind::Pending => None,
        }
    }
}

/// The surface a [`ChatWidget`](crate::services::widget::ChatWidget) renders into:
/// an input field, a send control and a transcript container.
///
/// Implementations only mutate their own state; ordering and sentinel
/// uniqueness are enforced by the widget.
pub trait ChatView: Send {
    /// Whether an element with this identifier exists.
    fn has_element(&self, id: &str) -> bool;

    fn input_value(&self) -> String;

    fn set_input(&mut self, text: &str);

    fn clear_input(&mut self) {
        self.set_input("");
    }

    fn focus_input(&mut self);

    fn set_send_enabled(&mut self, enabled: bool);

    fn is_send_enabled(&self) -> bool;

    fn append_entry(&mut self, entry: TranscriptEntry);

    /// Remove the first entry carrying `marker`. Returns whether one was removed.
    fn remove_marked(&mut self, marker: &str) -> bool;

    fn contains_marked(&self, marker: &str) -> bool;

    fn scroll_to_latest(&mut self);
}
