// src/services/widget.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{SubmitKey, WidgetConfig};
use crate::error::WidgetError;
use crate::message::{ChatRequest, Message, Sender};
use crate::services::client::ChatClient;
use crate::view::{ChatView, TranscriptEntry};

const GENERIC_FAILURE: &str = "Sorry, something went wrong.";
const DETAILED_FAILURE: &str = "Sorry, something went wrong. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Sending,
}

/// What a call to [`ChatWidget::send`] ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming.
    Skipped,
    /// Another request is in flight and single-flight is on.
    Busy,
    Replied,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
}

impl KeyEvent {
    pub fn enter() -> Self {
        Self { key: Key::Enter, shift: false }
    }

    pub fn shift_enter() -> Self {
        Self { key: Key::Enter, shift: true }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    SendClicked,
    KeyPress(KeyEvent),
}

/// Chat front-end bound to a view and a backend.
///
/// `send` takes `&self` so a shared widget can be driven from several tasks;
/// the request state decides whether overlapping sends are allowed.
pub struct ChatWidget<V, C> {
    view: Mutex<V>,
    client: C,
    config: WidgetConfig,
    in_flight: AtomicUsize,
    pending_marker: String,
}

impl<V, C> std::fmt::Debug for ChatWidget<V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("base_url", &self.config.base_url)
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .finish()
    }
}

impl<V, C> ChatWidget<V, C>
where
    V: ChatView,
    C: ChatClient,
{
    /// Bind to the view's input, send control and transcript, then greet.
    ///
    /// Fails with [`WidgetError::MissingElement`] if any of the configured
    /// element identifiers is absent.
    pub fn initialize(view: V, client: C, config: WidgetConfig) -> Result<Self, WidgetError> {
        if let Some(missing) = config.elements.all().into_iter().find(|id| !view.has_element(id)) {
            return Err(WidgetError::MissingElement(missing.to_string()));
        }

        let widget = Self {
            view: Mutex::new(view),
            client,
            config,
            in_flight: AtomicUsize::new(0),
            pending_marker: format!("loading-message-{}", Uuid::new_v4()),
        };

        if let Some(greeting) = widget.config.greeting.clone() {
            widget.append_message(greeting, Sender::Bot);
        }
        debug!(base_url = %widget.config.base_url, "chat widget initialized");
        Ok(widget)
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Lock the view for inspection or direct input.
    pub fn view(&self) -> MutexGuard<'_, V> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> RequestState {
        if self.in_flight.load(Ordering::SeqCst) == 0 {
            RequestState::Idle
        } else {
            RequestState::Sending
        }
    }

    pub fn pending_marker(&self) -> &str {
        &self.pending_marker
    }

    pub fn append_message(&self, text: impl Into<String>, sender: Sender) {
        let mut view = self.view();
        view.append_entry(TranscriptEntry::message(Message::new(text, sender)));
        view.scroll_to_latest();
    }

    pub fn show_pending(&self) {
        if !self.config.show_loading {
            return;
        }
        let mut view = self.view();
        if view.contains_marked(&self.pending_marker) {
            return;
        }
        view.append_entry(TranscriptEntry::pending(
            self.config.pending_text.clone(),
            self.pending_marker.clone(),
        ));
        view.scroll_to_latest();
    }

    pub fn clear_pending(&self) {
        self.view().remove_marked(&self.pending_marker);
    }

    /// Dispatch a UI event. Returns `None` when the event does not submit.
    pub async fn handle(&self, event: WidgetEvent) -> Option<SendOutcome> {
        match event {
            WidgetEvent::SendClicked => Some(self.send().await),
            WidgetEvent::KeyPress(key) if self.submits(key) => Some(self.send().await),
            WidgetEvent::KeyPress(_) => None,
        }
    }

    fn submits(&self, event: KeyEvent) -> bool {
        match (event.key, self.config.submit_key) {
            (Key::Enter, SubmitKey::AnyEnter) => true,
            (Key::Enter, SubmitKey::EnterWithoutShift) => !event.shift,
            _ => false,
        }
    }

    /// Submit the current input and render the reply or the failure.
    ///
    /// Never returns an error: every failure ends up in the transcript.
    pub async fn send(&self) -> SendOutcome {
        let text = self.view().input_value().trim().to_string();
        if text.is_empty() {
            return SendOutcome::Skipped;
        }

        let Some(_guard) = self.begin_request() else {
            warn!("send ignored: a request is already in flight");
            return SendOutcome::Busy;
        };

        {
            let mut view = self.view();
            view.append_entry(TranscriptEntry::message(Message::new(text.clone(), Sender::User)));
            view.scroll_to_latest();
            view.clear_input();
            if self.config.disable_send_while_pending {
                view.set_send_enabled(false);
            }
        }
        self.show_pending();

        debug!(chars = text.chars().count(), "dispatching chat request");
        // `_guard` restores the view when it drops on return.
        match self.client.send(&ChatRequest::new(text)).await {
            Ok(resp) => {
                self.clear_pending_if_last();
                let reply = resp.reply_or(&self.config.fallback_reply).to_string();
                info!(chars = reply.chars().count(), "chat reply received");
                self.append_message(reply, Sender::Bot);
                SendOutcome::Replied
            }
            Err(err) => {
                self.clear_pending_if_last();
                error!(error = %err, "chat request failed");
                self.append_message(self.failure_text(&err), Sender::Bot);
                SendOutcome::Failed
            }
        }
    }

    // The sentinel is shared by overlapping sends; only the last one out removes it.
    fn clear_pending_if_last(&self) {
        let mut view = self.view();
        if self.in_flight.load(Ordering::SeqCst) <= 1 {
            view.remove_marked(&self.pending_marker);
        }
    }

    fn failure_text(&self, err: &WidgetError) -> String {
        if self.config.error_detail {
            format!("{DETAILED_FAILURE}\n\nError: {err}")
        } else {
            GENERIC_FAILURE.to_string()
        }
    }

    fn begin_request(&self) -> Option<InFlight<'_, V, C>> {
        if self.config.single_flight {
            self.in_flight
                .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                .ok()?;
        } else {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
        }
        Some(InFlight { widget: self })
    }
}

/// Held for the lifetime of one request. Dropping it, whether the send
/// finished or its future was dropped mid-request, returns the widget to
/// `Idle` and, once no request is left, clears the sentinel and restores
/// the input affordances.
struct InFlight<'a, V: ChatView, C: ChatClient> {
    widget: &'a ChatWidget<V, C>,
}

impl<V: ChatView, C: ChatClient> Drop for InFlight<'_, V, C> {
    fn drop(&mut self) {
        let widget = self.widget;
        // Decrement under the view lock so a concurrent send cannot slip its
        // sentinel in between.
        let mut view = widget.view();
        if widget.in_flight.fetch_sub(1, Ordering::SeqCst) > 1 {
            return;
        }
        view.remove_marked(&widget.pending_marker);
        if widget.config.disable_send_while_pending {
            view.set_send_enabled(true);
        }
        view.focus_input();
    }
}
