//! Label colors.
//!
//! A [`ColorMap`] maps highlight labels to color tokens such as `"red"` or
//! `"#FFEE22"`. Tokens are kept as given; [`Color::parse`] turns them into RGB
//! when a caller needs actual values.
//!
//! # Examples
//!
//! ```
//! use highlighted_textbox::color::{Color, ColorMap, DEFAULT_COLOR};
//!
//! let map = ColorMap::new().with("person", "red").with("location", "#FFEE22");
//! assert_eq!(map.color_for(Some("person")), "red");
//! assert_eq!(map.color_for(Some("date")), DEFAULT_COLOR);
//! assert_eq!(map.color_for(None), DEFAULT_COLOR);
//!
//! let yellow = Color::parse("#FFEE22").unwrap();
//! assert_eq!(yellow.hex(), "#ffee22");
//! ```

use lru::LruCache;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

/// Token used for unlabeled text and labels missing from the map.
pub const DEFAULT_COLOR: &str = "transparent";

/// Named palette accepted by [`Color::parse`].
const NAMED_COLORS: [(&str, ColorTriplet); 11] = [
    ("red", ColorTriplet::new(0xef, 0x44, 0x44)),
    ("green", ColorTriplet::new(0x22, 0xc5, 0x5e)),
    ("blue", ColorTriplet::new(0x3b, 0x82, 0xf6)),
    ("yellow", ColorTriplet::new(0xea, 0xb3, 0x08)),
    ("purple", ColorTriplet::new(0xa8, 0x55, 0xf7)),
    ("teal", ColorTriplet::new(0x14, 0xb8, 0xa6)),
    ("orange", ColorTriplet::new(0xf9, 0x73, 0x16)),
    ("cyan", ColorTriplet::new(0x06, 0xb6, 0xd4)),
    ("lime", ColorTriplet::new(0x84, 0xcc, 0x16)),
    ("pink", ColorTriplet::new(0xec, 0x48, 0x99)),
    ("gray", ColorTriplet::new(0x6b, 0x72, 0x80)),
];

/// RGB color triplet with values 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorTriplet {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorTriplet {
    /// Create a new color triplet from RGB components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns CSS-style hex format `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl From<(u8, u8, u8)> for ColorTriplet {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl fmt::Display for ColorTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// A parsed color token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    /// The normalized token this color was parsed from.
    pub name: String,
    /// RGB value; `None` for the default (no background) color.
    pub triplet: Option<ColorTriplet>,
}

impl Default for Color {
    fn default() -> Self {
        Self::default_color()
    }
}

impl Color {
    /// The color used for unmapped labels and unlabeled text.
    #[must_use]
    pub fn default_color() -> Self {
        Self {
            name: DEFAULT_COLOR.to_string(),
            triplet: None,
        }
    }

    /// Create a color from RGB components.
    #[must_use]
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        ColorTriplet::new(red, green, blue).into()
    }

    /// Check if this is the default color.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.triplet.is_none()
    }

    /// CSS value: `#rrggbb`, or [`DEFAULT_COLOR`] for the default color.
    #[must_use]
    pub fn hex(&self) -> String {
        self.triplet
            .map_or_else(|| DEFAULT_COLOR.to_string(), |t| t.hex())
    }

    /// Parse a color token (cached).
    ///
    /// Supported formats:
    /// - Named colors: `red`, `teal`, ...
    /// - Hex format: `#FF0000`, `#F00`
    /// - RGB format: `rgb(255, 0, 0)`
    /// - Default: `default`, `transparent`
    ///
    /// # Errors
    ///
    /// Returns `ColorParseError` if the token is invalid:
    /// - `Empty` if the string is empty
    /// - `InvalidHex` if hex format is malformed
    /// - `InvalidRgb` if rgb(r,g,b) format is invalid
    /// - `UnknownColor` if the color name is not recognized
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Color>>> =
            LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(256).expect("non-zero"))));

        let normalized = color.trim().to_lowercase();

        if let Ok(mut cache) = CACHE.lock()
            && let Some(cached) = cache.get(&normalized)
        {
            return Ok(cached.clone());
        }

        let result = Self::parse_uncached(&normalized)?;

        if let Ok(mut cache) = CACHE.lock() {
            cache.put(normalized, result.clone());
        }

        Ok(result)
    }

    fn parse_uncached(token: &str) -> Result<Self, ColorParseError> {
        match token {
            "" => Err(ColorParseError::Empty),
            "default" | DEFAULT_COLOR => Ok(Self::default_color()),
            _ if token.starts_with('#') => parse_hex(token).map(Into::into),
            _ if token.starts_with("rgb(") => parse_rgb_function(token).map(Into::into),
            _ => NAMED_COLORS
                .iter()
                .find(|(name, _)| *name == token)
                .map(|(name, triplet)| Self {
                    name: (*name).to_string(),
                    triplet: Some(*triplet),
                })
                .ok_or_else(|| ColorParseError::UnknownColor(token.to_string())),
        }
    }
}

impl From<ColorTriplet> for Color {
    fn from(triplet: ColorTriplet) -> Self {
        Self {
            name: triplet.hex(),
            triplet: Some(triplet),
        }
    }
}

/// `#rrggbb` or the short `#rgb` form, where each digit is doubled.
fn parse_hex(token: &str) -> Result<ColorTriplet, ColorParseError> {
    let invalid = || ColorParseError::InvalidHex(token.to_string());
    let digits: Vec<u8> = token[1..]
        .chars()
        .map(|c| c.to_digit(16).and_then(|d| u8::try_from(d).ok()))
        .collect::<Option<_>>()
        .ok_or_else(invalid)?;

    match digits[..] {
        [r, g, b] => Ok(ColorTriplet::new(r * 17, g * 17, b * 17)),
        [r1, r2, g1, g2, b1, b2] => Ok(ColorTriplet::new(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
        _ => Err(invalid()),
    }
}

/// `rgb(r, g, b)` with each channel in 0-255.
fn parse_rgb_function(token: &str) -> Result<ColorTriplet, ColorParseError> {
    static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
            .expect("valid regex")
    });

    let invalid = || ColorParseError::InvalidRgb(token.to_string());
    let caps = RGB_RE.captures(token).ok_or_else(invalid)?;
    let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| invalid());
    Ok(ColorTriplet::new(channel(1)?, channel(2)?, channel(3)?))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    InvalidRgb(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::InvalidRgb(s) => write!(f, "Invalid RGB color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

// ============================================================================
// Color Map
// ============================================================================

/// Mapping from label to color token.
///
/// Need not cover every label in use; missing labels fall back to
/// [`DEFAULT_COLOR`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMap {
    colors: HashMap<String, String>,
}

impl ColorMap {
    /// Create an empty color map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a label's color.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(label.into(), color.into());
        self
    }

    /// Get the token mapped to `label`, if any.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.colors.get(label).map(String::as_str)
    }

    /// Color token for `label`; [`DEFAULT_COLOR`] if unmapped or `None`.
    #[must_use]
    pub fn color_for(&self, label: Option<&str>) -> &str {
        label.and_then(|l| self.get(l)).unwrap_or(DEFAULT_COLOR)
    }

    /// Parsed color for `label`.
    ///
    /// A token that does not parse degrades to the default color.
    #[must_use]
    pub fn resolve(&self, label: Option<&str>) -> Color {
        let token = self.color_for(label);
        Color::parse(token).unwrap_or_else(|err| {
            log::warn!("color for label {label:?} falls back to default: {err}");
            Color::default_color()
        })
    }

    /// Entries whose token does not parse, sorted by label.
    #[must_use]
    pub fn invalid_entries(&self) -> Vec<(&str, ColorParseError)> {
        let mut invalid: Vec<(&str, ColorParseError)> = self
            .colors
            .iter()
            .filter_map(|(label, token)| Color::parse(token).err().map(|e| (label.as_str(), e)))
            .collect();
        invalid.sort_unstable_by_key(|(label, _)| *label);
        invalid
    }

    /// Number of mapped labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if no labels are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate over `(label, token)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(l, c)| (l.as_str(), c.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            colors: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for ColorMap {
    fn from(colors: HashMap<String, String>) -> Self {
        Self { colors }
    }
}
