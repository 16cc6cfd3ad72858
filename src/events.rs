//! User-interaction notifications.
//!
//! The owning application implements [`EventSink`] to receive what the textbox
//! reports. Every method is a synchronous call and defaults to doing nothing,
//! so a sink only overrides the events it cares about.

use serde::{Deserialize, Serialize};

use crate::span::SpanList;

/// What the user selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectIndex {
    /// A whole fragment, by position in the span list.
    Fragment(usize),
    /// A character range `[start, end)` of the full text.
    Range(usize, usize),
}

/// Payload of a `select` notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectData {
    pub index: SelectIndex,
    /// The selected text.
    pub value: String,
    pub selected: bool,
}

impl SelectData {
    /// Selection of the fragment at `index`, or `None` if out of range.
    #[must_use]
    pub fn fragment(spans: &SpanList, index: usize) -> Option<Self> {
        spans.get(index).map(|fragment| Self {
            index: SelectIndex::Fragment(index),
            value: fragment.text.clone(),
            selected: true,
        })
    }

    /// Selection of characters `[start, end)` of `text`.
    ///
    /// Both ends are clamped to the character count, so `index` always
    /// describes the characters in `value`.
    #[must_use]
    pub fn range(text: &str, start: usize, end: usize) -> Self {
        let len = text.chars().count();
        let start = start.min(len);
        let end = end.clamp(start, len);
        let value: String = text.chars().skip(start).take(end - start).collect();
        Self {
            index: SelectIndex::Range(start, end),
            value,
            selected: true,
        }
    }
}

/// Receiver for textbox notifications.
pub trait EventSink {
    /// The value was replaced. `payload` is the span list as JSON.
    fn change(&mut self, _payload: &str) {}
    /// The user edited the text.
    fn input(&mut self) {}
    /// The user committed the text.
    fn submit(&mut self) {}
    /// The textbox lost focus.
    fn blur(&mut self) {}
    /// The textbox gained focus.
    fn focus(&mut self) {}
    /// The user selected a fragment or a character range.
    fn select(&mut self, _detail: &SelectData) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn change(&mut self, payload: &str) {
        (**self).change(payload);
    }

    fn input(&mut self) {
        (**self).input();
    }

    fn submit(&mut self) {
        (**self).submit();
    }

    fn blur(&mut self) {
        (**self).blur();
    }

    fn focus(&mut self) {
        (**self).focus();
    }

    fn select(&mut self, detail: &SelectData) {
        (**self).select(detail);
    }
}

/// A sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Change(String),
    Input,
    Submit,
    Blur,
    Focus,
    Select(SelectData),
}

impl Event {
    /// Event name as the owning application knows it.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Change(_) => "change",
            Self::Input => "input",
            Self::Submit => "submit",
            Self::Blur => "blur",
            Self::Focus => "focus",
            Self::Select(_) => "select",
        }
    }
}

/// A sink that keeps every notification in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<Event>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Payloads of recorded `change` events, oldest first.
    #[must_use]
    pub fn changes(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Change(payload) => Some(payload.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Take the recorded events, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn change(&mut self, payload: &str) {
        self.events.push(Event::Change(payload.to_string()));
    }

    fn input(&mut self) {
        self.events.push(Event::Input);
    }

    fn submit(&mut self) {
        self.events.push(Event::Submit);
    }

    fn blur(&mut self) {
        self.events.push(Event::Blur);
    }

    fn focus(&mut self) {
        self.events.push(Event::Focus);
    }

    fn select(&mut self, detail: &SelectData) {
        self.events.push(Event::Select(detail.clone()));
    }
}
