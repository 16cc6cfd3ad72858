//! Fragment and SpanList - the highlighted text data model.
//!
//! A `Fragment` is a piece of text with at most one label. A `SpanList` is the
//! ordered sequence of fragments that together make up the displayed text:
//! concatenating every fragment's text in order yields the full text exactly
//! once.
//!
//! Span lists are values. Every update produces a new list; nothing here
//! mutates a list that a caller already holds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (text, label) pair.
///
/// `label == None` means the text is not highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(String, Option<String>)", into = "(String, Option<String>)")]
pub struct Fragment {
    /// The text content.
    pub text: String,
    /// The highlight label (None = no highlight).
    pub label: Option<String>,
}

impl Fragment {
    /// Create a new fragment with text and optional label.
    #[must_use]
    pub fn new(text: impl Into<String>, label: Option<String>) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    /// Create a fragment carrying a label.
    #[must_use]
    pub fn labeled(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(text, Some(label.into()))
    }

    /// Create an unlabeled fragment.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    /// Check if the fragment has no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Borrow the label as `Option<&str>`.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl From<(String, Option<String>)> for Fragment {
    fn from((text, label): (String, Option<String>)) -> Self {
        Self { text, label }
    }
}

impl From<Fragment> for (String, Option<String>) {
    fn from(fragment: Fragment) -> Self {
        (fragment.text, fragment.label)
    }
}

impl From<(&str, Option<&str>)> for Fragment {
    fn from((text, label): (&str, Option<&str>)) -> Self {
        Self::new(text, label.map(str::to_string))
    }
}

impl From<&str> for Fragment {
    fn from(value: &str) -> Self {
        Self::plain(value)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// How runs of adjacent fragments are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergeMode {
    /// Merge consecutive fragments whose labels are equal (two `None` labels
    /// are equal).
    #[default]
    Equal,
}

/// An ordered sequence of fragments in display order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanList {
    fragments: Vec<Fragment>,
}

impl SpanList {
    /// Create an empty span list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    /// A span list holding `text` as one unlabeled fragment.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            fragments: vec![Fragment::plain(text)],
        }
    }

    /// Number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if there are no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Borrow the fragments in display order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Get the fragment at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Fragment> {
        self.fragments.get(index)
    }

    /// Iterate over the fragments in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Fragment> {
        self.fragments.iter()
    }

    /// The full displayed text.
    #[must_use]
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    /// Distinct non-null labels in order of first appearance.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for label in self.fragments.iter().filter_map(Fragment::label) {
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }

    /// Return the normalized form of this list.
    #[must_use]
    pub fn normalize(&self, mode: MergeMode) -> Self {
        Self {
            fragments: merge_elements(self.fragments.iter().cloned(), mode),
        }
    }

    /// Consume this list and return its normalized form.
    #[must_use]
    pub fn into_normalized(self, mode: MergeMode) -> Self {
        Self {
            fragments: merge_elements(self.fragments, mode),
        }
    }

    /// Serialize as `[[text, label], ...]`.
    #[must_use]
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("failed to serialize span list: {err}");
                String::from("[]")
            }
        }
    }

    /// Unwrap into the underlying fragments.
    #[must_use]
    pub fn into_inner(self) -> Vec<Fragment> {
        self.fragments
    }
}

impl From<Vec<Fragment>> for SpanList {
    fn from(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }
}

impl<F: Into<Fragment>> FromIterator<F> for SpanList {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            fragments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for SpanList {
    type Item = Fragment;
    type IntoIter = std::vec::IntoIter<Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpanList {
    type Item = &'a Fragment;
    type IntoIter = std::slice::Iter<'a, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}

impl fmt::Display for SpanList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            write!(f, "{fragment}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Merge runs of adjacent fragments according to `mode`.
///
/// Single left-to-right pass. Empty fragments are not skipped: they merge
/// into a neighbour with an equal label like any other fragment.
#[must_use]
pub fn merge_elements(fragments: impl IntoIterator<Item = Fragment>, mode: MergeMode) -> Vec<Fragment> {
    let mut result: Vec<Fragment> = Vec::new();

    for fragment in fragments {
        if let Some(last) = result.last_mut()
            && labels_merge(mode, last, &fragment)
        {
            last.text.push_str(&fragment.text);
            continue;
        }

        result.push(fragment);
    }

    result
}

/// Merge equal-label runs, joining merged texts with `separator`.
///
/// With an empty separator this is [`merge_elements`] in [`MergeMode::Equal`].
/// A non-empty separator changes the text, so the result no longer
/// concatenates back to the input text.
#[must_use]
pub fn merge_with_separator(spans: &SpanList, separator: &str) -> SpanList {
    if separator.is_empty() {
        return spans.normalize(MergeMode::Equal);
    }

    let mut result: Vec<Fragment> = Vec::new();
    for fragment in spans {
        if let Some(last) = result.last_mut()
            && labels_merge(MergeMode::Equal, last, fragment)
        {
            last.text.push_str(separator);
            last.text.push_str(&fragment.text);
            continue;
        }
        result.push(fragment.clone());
    }

    SpanList::from(result)
}

fn labels_merge(mode: MergeMode, last: &Fragment, next: &Fragment) -> bool {
    match mode {
        MergeMode::Equal => last.label == next.label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(items: &[(&str, Option<&str>)]) -> SpanList {
        items.iter().copied().collect()
    }

    #[test]
    fn test_fragment_constructors() {
        let frag = Fragment::labeled("hello", "x");
        assert_eq!(frag.text, "hello");
        assert_eq!(frag.label(), Some("x"));

        let frag = Fragment::plain("world");
        assert!(frag.label.is_none());
        assert!(!frag.is_empty());
        assert!(Fragment::default().is_empty());
    }

    #[test]
    fn test_merge_runs() {
        let input = spans(&[
            ("a", Some("x")),
            ("b", Some("x")),
            ("c", None),
            ("d", None),
            ("e", Some("x")),
        ]);
        let merged = input.normalize(MergeMode::Equal);
        assert_eq!(
            merged,
            spans(&[("ab", Some("x")), ("cd", None), ("e", Some("x"))])
        );
    }

    #[test]
    fn test_alternating_labels_unchanged() {
        let input = spans(&[("a", Some("x")), ("b", Some("y")), ("c", Some("x"))]);
        assert_eq!(input.normalize(MergeMode::Equal), input);
    }

    #[test]
    fn test_empty_list() {
        assert!(SpanList::new().normalize(MergeMode::Equal).is_empty());
    }

    #[test]
    fn test_empty_fragment_merges_into_neighbour() {
        let input = spans(&[("a", Some("x")), ("", Some("x")), ("b", Some("y"))]);
        let merged = input.normalize(MergeMode::Equal);
        assert_eq!(merged, spans(&[("a", Some("x")), ("b", Some("y"))]));

        // Not dropped when it has no equal neighbour
        let input = spans(&[("a", Some("x")), ("", None), ("b", Some("x"))]);
        assert_eq!(input.normalize(MergeMode::Equal).len(), 3);
    }

    #[test]
    fn test_text_content_never_blocks_merge() {
        let input = spans(&[(" ", Some("x")), ("\n", Some("x")), ("z", Some("x"))]);
        let merged = input.normalize(MergeMode::Equal);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.text(), " \nz");
    }

    #[test]
    fn test_normalize_returns_new_list() {
        let input = spans(&[("a", None), ("b", None)]);
        let merged = input.normalize(MergeMode::Equal);
        assert_eq!(input.len(), 2);
        assert_eq!(merged.len(), 1);
        assert_eq!(input.clone().into_normalized(MergeMode::Equal), merged);
    }

    #[test]
    fn test_merge_with_separator() {
        let input = spans(&[("New", Some("loc")), ("York", Some("loc")), ("is", None)]);
        let merged = merge_with_separator(&input, " ");
        assert_eq!(merged, spans(&[("New York", Some("loc")), ("is", None)]));

        assert_eq!(merge_with_separator(&input, ""), input.normalize(MergeMode::Equal));
    }

    #[test]
    fn test_text_and_labels() {
        let input = spans(&[("a", Some("y")), ("b", None), ("c", Some("x")), ("d", Some("y"))]);
        assert_eq!(input.text(), "abcd");
        assert_eq!(input.to_string(), "abcd");
        assert_eq!(input.labels(), vec!["y", "x"]);
    }

    #[test]
    fn test_json_shape() {
        let input = spans(&[("a", Some("x")), ("b", None)]);
        assert_eq!(input.to_json(), r#"[["a","x"],["b",null]]"#);

        let parsed: SpanList = serde_json::from_str(r#"[["hi",null],["there","greeting"]]"#).unwrap();
        assert_eq!(parsed, spans(&[("hi", None), ("there", Some("greeting"))]));
    }
}
