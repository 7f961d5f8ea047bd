// src/view/headless.rs
use std::collections::HashSet;

use super::{ChatView, TranscriptEntry};
use crate::config::ElementIds;
use crate::message::Message;

/// In-memory view with no rendering. Backs tests and embedders that draw
/// the transcript themselves.
#[derive(Debug, Clone)]
pub struct HeadlessView {
    elements: HashSet<String>,
    input: String,
    focused: bool,
    send_enabled: bool,
    entries: Vec<TranscriptEntry>,
    scrolled_to: Option<usize>,
}

impl Default for HeadlessView {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessView {
    /// A view exposing the default element identifiers.
    pub fn new() -> Self {
        Self::with_elements(&ElementIds::default())
    }

    pub fn with_elements(ids: &ElementIds) -> Self {
        Self {
            elements: ids.all().iter().map(|id| id.to_string()).collect(),
            input: String::new(),
            focused: false,
            send_enabled: true,
            entries: Vec::new(),
            scrolled_to: None,
        }
    }

    /// Drop an element, e.g. to simulate a page without a send button.
    pub fn without(mut self, id: &str) -> Self {
        self.elements.remove(id);
        self
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Transcript messages in order, sentinel excluded.
    pub fn messages(&self) -> Vec<Message> {
        self.entries
            .iter()
            .filter_map(TranscriptEntry::as_message)
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Index of the entry the container was last scrolled to.
    pub fn scrolled_to(&self) -> Option<usize> {
        self.scrolled_to
    }
}

impl ChatView for HeadlessView {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn focus_input(&mut self) {
        self.focused = true;
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    fn is_send_enabled(&self) -> bool {
        self.send_enabled
    }

    fn append_entry(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    fn remove_marked(&mut self, marker: &str) -> bool {
        match self.entries.iter().position(|e| e.has_marker(marker)) {
            Some(idx) => {
                self.entries.remove(idx);
                if let Some(pos) = self.scrolled_to {
                    self.scrolled_to = self.entries.len().checked_sub(1).map(|last| pos.min(last));
                }
                true
            }
            None => false,
        }
    }

    fn contains_marked(&self, marker: &str) -> bool {
        self.entries.iter().any(|e| e.has_marker(marker))
    }

    fn scroll_to_latest(&mut self) {
        self.scrolled_to = self.entries.len().checked_sub(1);
    }
}
