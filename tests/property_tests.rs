//! Property-based tests for span normalization.
//!
//! Uses proptest to check the invariants of `merge_elements` over generated
//! span lists.

use proptest::prelude::*;

use highlighted_textbox::events::RecordingSink;
use highlighted_textbox::span::{Fragment, MergeMode, SpanList, merge_with_separator};
use highlighted_textbox::{HighlightedTextbox, config::TextboxConfig};

// ============================================================================
// Custom Strategies
// ============================================================================

/// A small label alphabet so that equal neighbours are common.
fn label() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["x", "y", "z"]).prop_map(str::to_string))
}

/// Fragment text, including empty and non-ASCII text.
fn fragment_text() -> impl Strategy<Value = String> {
    "[a-z é日\n]{0,6}"
}

fn fragment() -> impl Strategy<Value = Fragment> {
    (fragment_text(), label()).prop_map(|(text, label)| Fragment::new(text, label))
}

fn span_list() -> impl Strategy<Value = SpanList> {
    prop::collection::vec(fragment(), 0..40).prop_map(SpanList::from)
}

// ============================================================================
// Normalization Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn prop_normalize_idempotent(spans in span_list()) {
        let once = spans.normalize(MergeMode::Equal);
        prop_assert_eq!(once.normalize(MergeMode::Equal), once);
    }

    #[test]
    fn prop_normalize_preserves_text(spans in span_list()) {
        prop_assert_eq!(spans.normalize(MergeMode::Equal).text(), spans.text());
    }

    #[test]
    fn prop_normalize_never_grows(spans in span_list()) {
        prop_assert!(spans.normalize(MergeMode::Equal).len() <= spans.len());
    }

    /// No two neighbours in the output share a label.
    #[test]
    fn prop_normalize_leaves_no_equal_neighbours(spans in span_list()) {
        let merged = spans.normalize(MergeMode::Equal);
        for pair in merged.fragments().windows(2) {
            prop_assert_ne!(&pair[0].label, &pair[1].label);
        }
    }

    /// Labels of the output are the input labels with runs collapsed.
    #[test]
    fn prop_normalize_preserves_label_order(spans in span_list()) {
        let mut expected: Vec<Option<String>> = Vec::new();
        for fragment in &spans {
            if expected.last() != Some(&fragment.label) {
                expected.push(fragment.label.clone());
            }
        }
        let actual: Vec<Option<String>> =
            spans.normalize(MergeMode::Equal).into_iter().map(|f| f.label).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_empty_separator_matches_normalize(spans in span_list()) {
        prop_assert_eq!(merge_with_separator(&spans, ""), spans.normalize(MergeMode::Equal));
    }

    #[test]
    fn prop_json_roundtrip(spans in span_list()) {
        let parsed: SpanList = serde_json::from_str(&spans.to_json()).unwrap();
        prop_assert_eq!(parsed, spans);
    }

    /// Each `set_value` yields exactly one `change`, in call order, carrying
    /// the normalized value.
    #[test]
    fn prop_change_notifications_follow_calls(values in prop::collection::vec(span_list(), 1..6)) {
        let mut textbox = HighlightedTextbox::new(
            TextboxConfig::new().combine_adjacent(true),
            RecordingSink::new(),
        );
        for value in &values {
            textbox.set_value(value.clone());
        }
        let expected: Vec<String> = values
            .iter()
            .map(|v| v.normalize(MergeMode::Equal).to_json())
            .collect();
        prop_assert_eq!(textbox.sink().changes(), expected);
    }
}
