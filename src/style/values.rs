//! Per-view style values tagged with their origin.

use std::collections::BTreeMap;

/// Where a style value came from.
///
/// Local values (set in code) take precedence over values matched from a
/// stylesheet and survive a CSS reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Css,
    Local,
}

/// A single style value with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleValue {
    pub value: String,
    pub source: ValueSource,
}

/// Style values of one view, keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewStyle {
    values: BTreeMap<String, StyleValue>,
}

impl ViewStyle {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `property`, whatever its origin.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.values.get(property).map(|v| v.value.as_str())
    }

    /// Origin of the current value of `property`.
    pub fn source(&self, property: &str) -> Option<ValueSource> {
        self.values.get(property).map(|v| v.source)
    }

    /// Set a local value, replacing any CSS value.
    pub fn set_local(&mut self, property: &str, value: impl Into<String>) {
        self.values.insert(
            property.to_owned(),
            StyleValue {
                value: value.into(),
                source: ValueSource::Local,
            },
        );
    }

    /// Set a value matched from a stylesheet.
    ///
    /// Returns `false` (and changes nothing) if a local value is present.
    pub fn set_css(&mut self, property: &str, value: impl Into<String>) -> bool {
        if self.source(property) == Some(ValueSource::Local) {
            return false;
        }
        self.values.insert(
            property.to_owned(),
            StyleValue {
                value: value.into(),
                source: ValueSource::Css,
            },
        );
        true
    }

    /// Discard every CSS-origin value. Returns how many were removed.
    pub fn reset_css_values(&mut self) -> usize {
        let before = self.values.len();
        self.values.retain(|_, v| v.source != ValueSource::Css);
        before - self.values.len()
    }

    /// Number of CSS-origin values.
    pub fn css_value_count(&self) -> usize {
        self.values
            .values()
            .filter(|v| v.source == ValueSource::Css)
            .count()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(property, value)` pairs in property order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
