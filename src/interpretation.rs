//! Token-level interpretation of textbox input.
//!
//! Input text is split into tokens on a separator. Explanation methods then
//! score each token by perturbing the input: leave-one-out strings drop (or
//! replace) a single token, and masked inputs keep only the tokens a binary
//! mask selects. Scores come back as `(token, score)` pairs interleaved with
//! zero-scored separators so they line up with the original text.

use std::fmt;

/// Tokenization settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    separator: String,
    replacement: Option<String>,
}

impl Default for Interpretation {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            replacement: None,
        }
    }
}

/// Output of [`Interpretation::tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    pub tokens: Vec<String>,
    /// One string per token, with that token dropped or replaced.
    pub leave_one_out: Vec<String>,
}

impl Interpretation {
    /// Create interpretation settings.
    ///
    /// `replacement` is what a token turns into in leave-one-out strings;
    /// `None` removes the token altogether.
    ///
    /// # Errors
    ///
    /// Returns `InterpretationError::EmptySeparator` if `separator` is empty.
    pub fn new(
        separator: impl Into<String>,
        replacement: Option<String>,
    ) -> Result<Self, InterpretationError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(InterpretationError::EmptySeparator);
        }
        Ok(Self {
            separator,
            replacement,
        })
    }

    /// Token separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Stand-in for a left-out token, if any.
    #[must_use]
    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    /// Split `text` into tokens and build the leave-one-out strings.
    ///
    /// Splitting is exact: consecutive separators produce empty tokens.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Tokenized {
        let tokens: Vec<String> = text.split(self.separator.as_str()).map(str::to_string).collect();

        let leave_one_out = (0..tokens.len())
            .map(|index| {
                let mut set: Vec<&str> = tokens.iter().map(String::as_str).collect();
                match &self.replacement {
                    Some(replacement) => set[index] = replacement.as_str(),
                    None => {
                        set.remove(index);
                    }
                }
                set.join(&self.separator)
            })
            .collect();

        Tokenized {
            tokens,
            leave_one_out,
        }
    }

    /// Join the tokens each mask keeps.
    ///
    /// # Errors
    ///
    /// Returns `InterpretationError::MaskLength` if a mask does not have one
    /// entry per token.
    pub fn masked_inputs(
        &self,
        tokens: &[String],
        masks: &[Vec<bool>],
    ) -> Result<Vec<String>, InterpretationError> {
        masks
            .iter()
            .map(|mask| {
                if mask.len() != tokens.len() {
                    return Err(InterpretationError::MaskLength {
                        expected: tokens.len(),
                        found: mask.len(),
                    });
                }
                let kept: Vec<&str> = tokens
                    .iter()
                    .zip(mask)
                    .filter(|(_, keep)| **keep)
                    .map(|(token, _)| token.as_str())
                    .collect();
                Ok(kept.join(&self.separator))
            })
            .collect()
    }

    /// Pair each token with its score, following it with the separator at
    /// score zero. Extra tokens or scores are ignored.
    #[must_use]
    pub fn interpretation_scores(&self, tokens: &[String], scores: &[f64]) -> Vec<(String, f64)> {
        tokens
            .iter()
            .zip(scores)
            .flat_map(|(token, score)| [(token.clone(), *score), (self.separator.clone(), 0.0)])
            .collect()
    }
}

/// Error type for interpretation settings and masks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpretationError {
    EmptySeparator,
    MaskLength { expected: usize, found: usize },
}

impl fmt::Display for InterpretationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySeparator => write!(f, "interpretation separator must not be empty"),
            Self::MaskLength { expected, found } => {
                write!(f, "mask has {found} entries but there are {expected} tokens")
            }
        }
    }
}

impl std::error::Error for InterpretationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_tokenize_leave_one_out_removes() {
        let tokenized = Interpretation::default().tokenize("the quick fox");
        assert_eq!(tokenized.tokens, strings(&["the", "quick", "fox"]));
        assert_eq!(
            tokenized.leave_one_out,
            strings(&["quick fox", "the fox", "the quick"])
        );
    }

    #[test]
    fn test_tokenize_leave_one_out_replaces() {
        let interp = Interpretation::new(",", Some("_".to_string())).unwrap();
        let tokenized = interp.tokenize("a,b");
        assert_eq!(tokenized.leave_one_out, strings(&["_,b", "a,_"]));
    }

    #[test]
    fn test_tokenize_keeps_empty_tokens() {
        let tokenized = Interpretation::default().tokenize("a  b");
        assert_eq!(tokenized.tokens, strings(&["a", "", "b"]));
    }

    #[test]
    fn test_empty_separator_rejected() {
        assert_eq!(
            Interpretation::new("", None),
            Err(InterpretationError::EmptySeparator)
        );
    }

    #[test]
    fn test_masked_inputs() {
        let interp = Interpretation::default();
        let tokens = strings(&["a", "b", "c"]);
        let masks = vec![vec![true, false, true], vec![false, false, false]];
        assert_eq!(
            interp.masked_inputs(&tokens, &masks).unwrap(),
            strings(&["a c", ""])
        );

        let err = interp.masked_inputs(&tokens, &[vec![true]]).unwrap_err();
        assert_eq!(err.to_string(), "mask has 1 entries but there are 3 tokens");
    }

    #[test]
    fn test_interpretation_scores_interleave_separator() {
        let interp = Interpretation::default();
        let scores = interp.interpretation_scores(&strings(&["hi", "there"]), &[0.5, -0.25]);
        assert_eq!(
            scores,
            vec![
                ("hi".to_string(), 0.5),
                (" ".to_string(), 0.0),
                ("there".to_string(), -0.25),
                (" ".to_string(), 0.0),
            ]
        );
    }
}
