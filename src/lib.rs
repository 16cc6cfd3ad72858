//! # highlighted_textbox
//!
//! Data model and controller for an editable highlighted-text widget.
//!
//! The displayed text is a sequence of fragments, each optionally tagged with
//! a label. Labels map to background colors and feed an optional legend.
//!
//! ## Quick Start
//!
//! ```rust
//! use highlighted_textbox::prelude::*;
//!
//! let spans: SpanList = [
//!     ("a", Some("x")),
//!     ("b", Some("x")),
//!     ("c", None),
//!     ("d", None),
//!     ("e", Some("x")),
//! ]
//! .into_iter()
//! .collect();
//!
//! let merged = spans.normalize(MergeMode::Equal);
//! assert_eq!(merged.to_json(), r#"[["ab","x"],["cd",null],["e","x"]]"#);
//! ```
//!
//! ## Core Concepts
//!
//! - **Fragment**: a (text, label) pair
//! - **SpanList**: fragments in display order, partitioning the text
//! - **ColorMap**: label to color token
//! - **HighlightedTextbox**: owns the value, normalizes it and reports events
//! - **EventSink**: receives change/input/submit/blur/focus/select

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod config;
pub mod events;
pub mod highlights;
pub mod interpretation;
pub mod span;
pub mod textbox;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::color::{Color, ColorMap, ColorParseError, ColorTriplet, DEFAULT_COLOR};
    pub use crate::config::{ConfigError, ConfigUpdate, TextboxConfig};
    pub use crate::events::{Event, EventSink, NullSink, RecordingSink, SelectData, SelectIndex};
    pub use crate::highlights::{Highlight, HighlightError, HighlightedText, TextboxValue};
    pub use crate::interpretation::{Interpretation, InterpretationError, Tokenized};
    pub use crate::span::{Fragment, MergeMode, SpanList, merge_elements, merge_with_separator};
    pub use crate::textbox::HighlightedTextbox;
}

// Re-export key types at crate root
pub use color::ColorMap;
pub use events::{EventSink, SelectData};
pub use span::{Fragment, MergeMode, SpanList};
pub use textbox::HighlightedTextbox;
