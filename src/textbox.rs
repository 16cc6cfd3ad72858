//! The highlighted textbox controller.
//!
//! Holds the current [`SpanList`] and the display settings, normalizes values
//! when `combine_adjacent` is on, and forwards user interaction to an
//! [`EventSink`].
//!
//! # Value transitions
//!
//! [`HighlightedTextbox::set_value`] is the only way the value changes. Each
//! call replaces the whole list and then notifies the sink:
//!
//! 1. `change` with the new list as JSON
//! 2. `input`, unless the value was set by the application through
//!    [`HighlightedTextbox::set_output`]
//!
//! ```
//! use highlighted_textbox::prelude::*;
//!
//! let config = TextboxConfig::new().combine_adjacent(true);
//! let mut textbox = HighlightedTextbox::new(config, RecordingSink::new());
//!
//! textbox.set_output(SpanList::from_iter([("a", Some("x")), ("b", Some("x"))]));
//! assert_eq!(textbox.value().len(), 1);
//! assert_eq!(textbox.sink().changes(), vec![r#"[["ab","x"]]"#]);
//! ```

use crate::color::ColorMap;
use crate::config::{ConfigUpdate, TextboxConfig};
use crate::events::{EventSink, NullSink, SelectData};
use crate::highlights::{HighlightError, TextboxValue};
use crate::interpretation::{Interpretation, InterpretationError};
use crate::span::{SpanList, merge_with_separator};

/// Controller for one highlighted textbox.
#[derive(Debug)]
pub struct HighlightedTextbox<S: EventSink = NullSink> {
    config: TextboxConfig,
    value: SpanList,
    value_is_output: bool,
    interpretation: Interpretation,
    sink: S,
}

impl Default for HighlightedTextbox<NullSink> {
    fn default() -> Self {
        Self::new(TextboxConfig::default(), NullSink)
    }
}

impl<S: EventSink> HighlightedTextbox<S> {
    /// Create a textbox with an empty value.
    #[must_use]
    pub fn new(config: TextboxConfig, sink: S) -> Self {
        Self {
            config,
            value: SpanList::new(),
            value_is_output: false,
            interpretation: Interpretation::default(),
            sink,
        }
    }

    /// Set the initial value without notifying the sink.
    #[must_use]
    pub fn with_value(mut self, value: SpanList) -> Self {
        self.value = self.normalized(value);
        self
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &SpanList {
        &self.value
    }

    /// The current settings.
    #[must_use]
    pub fn config(&self) -> &TextboxConfig {
        &self.config
    }

    /// Borrow the event sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the event sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the textbox and return its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// True while an application-originated value is being applied.
    #[must_use]
    pub const fn value_is_output(&self) -> bool {
        self.value_is_output
    }

    /// Replace the value and notify the sink.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(fragments = new_value.len())))]
    pub fn set_value(&mut self, new_value: SpanList) {
        self.value = self.normalized(new_value);
        log::debug!(
            "textbox value replaced: {} fragments, output={}",
            self.value.len(),
            self.value_is_output
        );

        let payload = self.value.to_json();
        log::trace!("dispatch change");
        self.sink.change(&payload);

        if !self.value_is_output {
            log::trace!("dispatch input");
            self.sink.input();
        }
        self.value_is_output = false;
    }

    /// Replace the value on behalf of the application.
    ///
    /// Same as [`set_value`](Self::set_value) but does not echo `input`.
    pub fn set_output(&mut self, new_value: SpanList) {
        self.value_is_output = true;
        self.set_value(new_value);
    }

    /// Accept a value in either input shape and apply it as output.
    ///
    /// # Errors
    ///
    /// Returns `HighlightError` if an offset-based value has invalid ranges;
    /// the current value is kept in that case.
    pub fn postprocess(&mut self, value: TextboxValue) -> Result<(), HighlightError> {
        let spans = value.into_span_list()?;
        self.set_output(spans);
        Ok(())
    }

    /// The value as plain text.
    #[must_use]
    pub fn preprocess(&self) -> String {
        self.value.text()
    }

    /// Replace the label colors.
    pub fn set_color_map(&mut self, color_map: ColorMap) {
        for (label, err) in color_map.invalid_entries() {
            log::warn!("color_map entry {label:?} will render with the default color: {err}");
        }
        self.config.color_map = color_map;
    }

    /// Turn normalization on or off.
    ///
    /// Turning it on normalizes the current value; if that changes it, the
    /// sink sees a `change`.
    pub fn set_combine_adjacent(&mut self, combine: bool) {
        self.config.combine_adjacent = combine;
        if combine {
            let normalized = self.normalized(self.value.clone());
            if normalized != self.value {
                self.set_output(normalized);
            }
        }
    }

    /// Apply a partial update. A `value` in the update goes through
    /// [`set_output`](Self::set_output) after the settings are applied; a
    /// `null` value clears the textbox to an empty list.
    ///
    /// # Errors
    ///
    /// Returns `HighlightError` if the update carries an invalid offset-based
    /// value. Settings are applied regardless.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn apply_update(&mut self, mut update: ConfigUpdate) -> Result<(), HighlightError> {
        update.apply_settings(&mut self.config);
        match update.value {
            Some(Some(value)) => self.postprocess(value),
            Some(None) => {
                self.set_output(SpanList::new());
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Forward a user `input` event.
    pub fn notify_input(&mut self) {
        log::trace!("dispatch input");
        self.sink.input();
    }

    /// Forward a user `submit` event.
    pub fn notify_submit(&mut self) {
        log::trace!("dispatch submit");
        self.sink.submit();
    }

    /// Forward a `blur` event.
    pub fn notify_blur(&mut self) {
        log::trace!("dispatch blur");
        self.sink.blur();
    }

    /// Forward a `focus` event.
    pub fn notify_focus(&mut self) {
        log::trace!("dispatch focus");
        self.sink.focus();
    }

    /// Forward an explicit user selection.
    pub fn notify_select(&mut self, detail: &SelectData) {
        log::trace!("dispatch select {:?}", detail.index);
        self.sink.select(detail);
    }

    /// Select the fragment at `index` of the current value.
    ///
    /// Returns false, without notifying, if there is no such fragment.
    pub fn select_fragment(&mut self, index: usize) -> bool {
        match SelectData::fragment(&self.value, index) {
            Some(detail) => {
                self.notify_select(&detail);
                true
            }
            None => false,
        }
    }

    /// Configure how input is split for interpretation.
    ///
    /// # Errors
    ///
    /// Returns `InterpretationError::EmptySeparator` for an empty separator;
    /// the previous settings are kept.
    pub fn set_interpret_parameters(
        &mut self,
        separator: &str,
        replacement: Option<String>,
    ) -> Result<(), InterpretationError> {
        self.interpretation = Interpretation::new(separator, replacement)?;
        Ok(())
    }

    /// Current interpretation settings.
    #[must_use]
    pub fn interpretation(&self) -> &Interpretation {
        &self.interpretation
    }

    /// Color token for `label`.
    #[must_use]
    pub fn color_for(&self, label: Option<&str>) -> &str {
        self.config.color_map.color_for(label)
    }

    /// `(label, color)` for every label in the value, first appearance first.
    #[must_use]
    pub fn legend(&self) -> Vec<(String, String)> {
        self.value
            .labels()
            .into_iter()
            .map(|label| (label.to_string(), self.color_for(Some(label)).to_string()))
            .collect()
    }

    fn normalized(&self, value: SpanList) -> SpanList {
        if self.config.combine_adjacent {
            merge_with_separator(&value, &self.config.adjacent_separator)
        } else {
            value
        }
    }
}
