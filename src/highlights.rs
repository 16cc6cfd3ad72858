//! Offset-based highlight input.
//!
//! Besides a ready-made [`SpanList`], a value may arrive as the full text plus
//! a list of labeled character ranges. This module converts that form into a
//! span list that partitions the text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::span::{Fragment, SpanList};

/// A labeled character range `[start, end)`.
///
/// Offsets count Unicode scalar values, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub highlight_type: Option<String>,
    pub start: usize,
    pub end: usize,
}

impl Highlight {
    #[must_use]
    pub fn new(highlight_type: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            highlight_type: Some(highlight_type.into()),
            start,
            end,
        }
    }
}

/// Full text plus non-overlapping highlights.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighlightedText {
    pub text: String,
    pub highlights: Vec<Highlight>,
}

impl HighlightedText {
    #[must_use]
    pub fn new(text: impl Into<String>, highlights: Vec<Highlight>) -> Self {
        Self {
            text: text.into(),
            highlights,
        }
    }

    /// Convert into a span list.
    ///
    /// Highlights are sorted by `start`. Every highlight is preceded by the
    /// (possibly empty) unlabeled gap before it, and the list always ends
    /// with the unlabeled remainder. With no highlights the result is the
    /// whole text as one unlabeled fragment.
    ///
    /// # Errors
    ///
    /// - `InvertedRange` if a highlight ends before it starts
    /// - `OutOfBounds` if a highlight extends past the end of the text
    /// - `Overlapping` if two highlights share characters
    pub fn to_span_list(&self) -> Result<SpanList, HighlightError> {
        if self.highlights.is_empty() {
            return Ok(SpanList::plain(self.text.clone()));
        }

        // Byte offset of every char boundary, including the end of the text.
        let boundaries: Vec<usize> = self
            .text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(self.text.len()))
            .collect();
        let char_len = boundaries.len() - 1;

        let mut sorted: Vec<&Highlight> = self.highlights.iter().collect();
        sorted.sort_by_key(|h| h.start);

        let mut fragments = Vec::with_capacity(sorted.len() * 2 + 1);
        let mut index = 0;

        for highlight in sorted {
            if highlight.end < highlight.start {
                return Err(HighlightError::InvertedRange {
                    start: highlight.start,
                    end: highlight.end,
                });
            }
            if highlight.end > char_len {
                return Err(HighlightError::OutOfBounds {
                    end: highlight.end,
                    len: char_len,
                });
            }
            if highlight.start < index {
                return Err(HighlightError::Overlapping {
                    start: highlight.start,
                    previous_end: index,
                });
            }

            let gap = &self.text[boundaries[index]..boundaries[highlight.start]];
            fragments.push(Fragment::plain(gap));
            let marked = &self.text[boundaries[highlight.start]..boundaries[highlight.end]];
            fragments.push(Fragment::new(marked, highlight.highlight_type.clone()));
            index = highlight.end;
        }

        fragments.push(Fragment::plain(&self.text[boundaries[index]..]));
        Ok(SpanList::from(fragments))
    }
}

/// Either accepted shape of a textbox value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextboxValue {
    /// `[[text, label], ...]`
    Spans(SpanList),
    /// `{"text": ..., "highlights": [...]}`
    Highlighted(HighlightedText),
}

impl TextboxValue {
    /// Resolve to a span list.
    ///
    /// # Errors
    ///
    /// Propagates [`HighlightedText::to_span_list`] errors.
    pub fn into_span_list(self) -> Result<SpanList, HighlightError> {
        match self {
            Self::Spans(spans) => Ok(spans),
            Self::Highlighted(highlighted) => highlighted.to_span_list(),
        }
    }
}

impl From<SpanList> for TextboxValue {
    fn from(value: SpanList) -> Self {
        Self::Spans(value)
    }
}

impl From<HighlightedText> for TextboxValue {
    fn from(value: HighlightedText) -> Self {
        Self::Highlighted(value)
    }
}

/// Error type for highlight conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    InvertedRange { start: usize, end: usize },
    OutOfBounds { end: usize, len: usize },
    Overlapping { start: usize, previous_end: usize },
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedRange { start, end } => {
                write!(f, "highlight range is inverted: {start}..{end}")
            }
            Self::OutOfBounds { end, len } => {
                write!(f, "highlight ends at {end} but text has {len} characters")
            }
            Self::Overlapping {
                start,
                previous_end,
            } => write!(
                f,
                "highlight starting at {start} overlaps previous highlight ending at {previous_end}"
            ),
        }
    }
}

impl std::error::Error for HighlightError {}
