// src/view/terminal.rs
use std::io::Write;

use colored::Colorize;

use super::{ChatView, EntryKind, TranscriptEntry};
use crate::message::Sender;

// Move up one line and clear it.
const ERASE_LINE: &str = "\x1b[1A\x1b[2K";

/// Renders the transcript as styled lines on a writer (normally stdout).
///
/// The input field is filled by the caller from its line editor. Printed
/// lines cannot be taken back, so a pending entry is only erased while it is
/// still the last thing written.
pub struct TerminalView<W: Write + Send> {
    out: W,
    input: String,
    send_enabled: bool,
    live_markers: Vec<String>,
    // (marker, rendered line count) of the entry printed last, if pending
    trailing_pending: Option<(String, usize)>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            input: String::new(),
            send_enabled: true,
            live_markers: Vec::new(),
            trailing_pending: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(entry: &TranscriptEntry) -> String {
        match entry.kind {
            EntryKind::Message(Sender::User) => format!("{} {}", "You:".green().bold(), entry.text),
            EntryKind::Message(Sender::Bot) => format!("{} {}", "Bot:".cyan().bold(), entry.text),
            EntryKind::Pending => entry.text.dimmed().to_string(),
        }
    }

    fn write_out(&mut self, text: &str) {
        if let Err(err) = self.out.write_all(text.as_bytes()) {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
    }
}

impl<W: Write + Send> ChatView for TerminalView<W> {
    fn has_element(&self, _id: &str) -> bool {
        true
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    // The line editor owns the cursor.
    fn focus_input(&mut self) {}

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    fn is_send_enabled(&self) -> bool {
        self.send_enabled
    }

    fn append_entry(&mut self, entry: TranscriptEntry) {
        let rendered = Self::render(&entry);
        let lines = rendered.lines().count().max(1);
        self.write_out(&rendered);
        self.write_out("\n");

        self.trailing_pending = match &entry.marker {
            Some(marker) if entry.is_pending() => Some((marker.clone(), lines)),
            _ => None,
        };
        if let Some(marker) = entry.marker {
            self.live_markers.push(marker);
        }
    }

    fn remove_marked(&mut self, marker: &str) -> bool {
        let Some(idx) = self.live_markers.iter().position(|m| m == marker) else {
            return false;
        };
        self.live_markers.remove(idx);

        if let Some((last, lines)) = self.trailing_pending.take() {
            if last == marker {
                self.write_out(&ERASE_LINE.repeat(lines));
            } else {
                self.trailing_pending = Some((last, lines));
            }
        }
        true
    }

    fn contains_marked(&self, marker: &str) -> bool {
        self.live_markers.iter().any(|m| m == marker)
    }

    fn scroll_to_latest(&mut self) {
        if let Err(err) = self.out.flush() {
            tracing::warn!(error = %err, "failed to flush terminal");
        }
    }
}
