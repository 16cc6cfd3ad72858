//! Display configuration for a highlighted textbox.
//!
//! Every setting is plain data handed to the display shell. Only
//! `combine_adjacent` and `adjacent_separator` change how the textbox itself
//! behaves.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::color::ColorMap;
use crate::highlights::TextboxValue;

/// Full settings of one textbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextboxConfig {
    /// Component name shown above the textbox.
    pub label: Option<String>,
    /// Additional description text.
    pub info: Option<String>,
    /// Caption shown next to the legend.
    pub legend_label: String,
    pub show_label: bool,
    pub show_legend: bool,
    pub show_legend_label: bool,
    pub show_copy_button: bool,
    pub autofocus: bool,
    pub autoscroll: bool,
    pub container: bool,
    /// `None` lets the application decide from how the textbox is used.
    pub interactive: Option<bool>,
    /// Normalize every new value by merging equal-label runs.
    pub combine_adjacent: bool,
    /// Inserted between merged texts when `combine_adjacent` is set.
    pub adjacent_separator: String,
    pub color_map: ColorMap,
}

impl Default for TextboxConfig {
    fn default() -> Self {
        Self {
            label: None,
            info: None,
            legend_label: String::new(),
            show_label: true,
            show_legend: false,
            show_legend_label: false,
            show_copy_button: false,
            autofocus: false,
            autoscroll: true,
            container: true,
            interactive: None,
            combine_adjacent: false,
            adjacent_separator: String::new(),
            color_map: ColorMap::default(),
        }
    }
}

impl TextboxConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the input is not a valid config object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Json)?;
        for (label, err) in config.color_map.invalid_entries() {
            log::warn!("color_map entry {label:?} will render with the default color: {err}");
        }
        Ok(config)
    }

    /// Set the component label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description text.
    #[must_use]
    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Set the legend caption.
    #[must_use]
    pub fn legend_label(mut self, legend_label: impl Into<String>) -> Self {
        self.legend_label = legend_label.into();
        self
    }

    /// Enable or disable the component label.
    #[must_use]
    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }

    /// Enable or disable the legend.
    #[must_use]
    pub fn show_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Enable or disable the legend caption.
    #[must_use]
    pub fn show_legend_label(mut self, show: bool) -> Self {
        self.show_legend_label = show;
        self
    }

    /// Enable or disable the copy button.
    #[must_use]
    pub fn show_copy_button(mut self, show: bool) -> Self {
        self.show_copy_button = show;
        self
    }

    /// Focus the textbox when it is first shown.
    #[must_use]
    pub fn autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }

    /// Scroll to the end when the value changes.
    #[must_use]
    pub fn autoscroll(mut self, autoscroll: bool) -> Self {
        self.autoscroll = autoscroll;
        self
    }

    /// Place the textbox in a padded container.
    #[must_use]
    pub fn container(mut self, container: bool) -> Self {
        self.container = container;
        self
    }

    /// Force the textbox editable or read-only.
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = Some(interactive);
        self
    }

    /// Merge equal-label runs on every value change.
    #[must_use]
    pub fn combine_adjacent(mut self, combine: bool) -> Self {
        self.combine_adjacent = combine;
        self
    }

    /// Separator placed between merged texts.
    #[must_use]
    pub fn adjacent_separator(mut self, separator: impl Into<String>) -> Self {
        self.adjacent_separator = separator.into();
        self
    }

    /// Set the label colors.
    #[must_use]
    pub fn color_map(mut self, color_map: ColorMap) -> Self {
        self.color_map = color_map;
        self
    }
}

/// Partial update: every `Some` field replaces the current setting.
///
/// `value` has three states: absent (`None`, keep the value), `null`
/// (`Some(None)`, clear it) and a new value (`Some(Some(_))`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Option<TextboxValue>>,
    pub color_map: Option<ColorMap>,
    pub show_legend: Option<bool>,
    pub show_legend_label: Option<bool>,
    pub legend_label: Option<String>,
    pub label: Option<String>,
    pub info: Option<String>,
    pub show_label: Option<bool>,
    pub container: Option<bool>,
    pub interactive: Option<bool>,
    pub show_copy_button: Option<bool>,
    pub autofocus: Option<bool>,
    pub autoscroll: Option<bool>,
}

impl ConfigUpdate {
    /// Parse an update from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the input is not a valid update object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Json)
    }

    /// Apply the settings part of this update. `value` is left for the caller.
    pub(crate) fn apply_settings(&mut self, config: &mut TextboxConfig) {
        if let Some(color_map) = self.color_map.take() {
            config.color_map = color_map;
        }
        if let Some(show) = self.show_legend {
            config.show_legend = show;
        }
        if let Some(show) = self.show_legend_label {
            config.show_legend_label = show;
        }
        if let Some(legend_label) = self.legend_label.take() {
            config.legend_label = legend_label;
        }
        if let Some(label) = self.label.take() {
            config.label = Some(label);
        }
        if let Some(info) = self.info.take() {
            config.info = Some(info);
        }
        if let Some(show) = self.show_label {
            config.show_label = show;
        }
        if let Some(container) = self.container {
            config.container = container;
        }
        if let Some(interactive) = self.interactive {
            config.interactive = Some(interactive);
        }
        if let Some(show) = self.show_copy_button {
            config.show_copy_button = show;
        }
        if let Some(autofocus) = self.autofocus {
            config.autofocus = autofocus;
        }
        if let Some(autoscroll) = self.autoscroll {
            config.autoscroll = autoscroll;
        }
    }
}

/// A key that is present deserializes to `Some`, even when it is `null`.
/// Absent keys fall back to `None` through `#[serde(default)]`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Errors returned when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid textbox config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TextboxConfig::default();
        assert!(config.show_label);
        assert!(config.container);
        assert!(config.autoscroll);
        assert!(!config.combine_adjacent);
        assert!(config.adjacent_separator.is_empty());
        assert!(config.color_map.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = TextboxConfig::new()
            .label("Entities")
            .legend_label("Legend")
            .show_legend(true)
            .combine_adjacent(true)
            .color_map(ColorMap::new().with("PER", "red"));
        assert_eq!(config.label.as_deref(), Some("Entities"));
        assert_eq!(config.legend_label, "Legend");
        assert!(config.show_legend);
        assert!(config.combine_adjacent);
        assert_eq!(config.color_map.get("PER"), Some("red"));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = TextboxConfig::from_json(
            r##"{"combine_adjacent": true, "color_map": {"PER": "#f00"}}"##,
        )
        .unwrap();
        assert!(config.combine_adjacent);
        assert!(config.show_label);
        assert_eq!(config.color_map.color_for(Some("PER")), "#f00");
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let err = TextboxConfig::from_json(r#"{"show_legend": "yes"}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid textbox config:"));
    }

    #[test]
    fn test_update_value_absent_null_or_present() {
        let absent = ConfigUpdate::from_json(r#"{"show_legend": true}"#).unwrap();
        assert_eq!(absent.value, None);

        let null = ConfigUpdate::from_json(r#"{"value": null}"#).unwrap();
        assert_eq!(null.value, Some(None));

        let present = ConfigUpdate::from_json(r#"{"value": [["a", null]]}"#).unwrap();
        assert!(matches!(present.value, Some(Some(TextboxValue::Spans(_)))));
    }

    #[test]
    fn test_apply_settings_only_touches_some_fields() {
        let mut config = TextboxConfig::new().label("before").show_legend(true);
        let mut update = ConfigUpdate {
            show_legend: Some(false),
            legend_label: Some("Kinds".to_string()),
            ..ConfigUpdate::default()
        };
        update.apply_settings(&mut config);
        assert_eq!(config.label.as_deref(), Some("before"));
        assert!(!config.show_legend);
        assert_eq!(config.legend_label, "Kinds");
    }
}
