//! Style directives and the builder that flattens them into classes, CSS
//! custom properties and inline declarations.

pub mod color;

pub use color::{ColorKind, color_directive, gradient_directive};

use serde_json::Value;

/// A directive's value.
///
/// Text values of `""`, `"none"` and `"0"` mean "not set". Numeric zero is a
/// real value (an opacity of 0 must still render).
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    None,
    Text(String),
    Number(f64),
}

impl StyleValue {
    pub fn text(s: impl Into<String>) -> Self {
        StyleValue::Text(s.into())
    }

    /// Renders the value, or `None` when it counts as unset.
    pub fn css(&self) -> Option<String> {
        match self {
            StyleValue::None => None,
            StyleValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() || s == "none" || s == "0" {
                    None
                } else {
                    Some(s.to_string())
                }
            }
            StyleValue::Number(n) => Some(format_number(*n)),
        }
    }

    /// Like [`StyleValue::css`] with a unit appended to numbers.
    pub fn css_with_unit(&self, unit: &str) -> Option<String> {
        match self {
            StyleValue::Number(n) => Some(format!("{}{unit}", format_number(*n))),
            other => other.css(),
        }
    }
}

impl From<Option<&Value>> for StyleValue {
    fn from(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => StyleValue::Text(s.clone()),
            Some(Value::Number(n)) => n.as_f64().map_or(StyleValue::None, StyleValue::Number),
            _ => StyleValue::None,
        }
    }
}

impl From<Option<String>> for StyleValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(StyleValue::None, StyleValue::Text)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Number(value as f64)
    }
}

impl From<Option<i64>> for StyleValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(StyleValue::None, Into::into)
    }
}

impl From<Option<f64>> for StyleValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(StyleValue::None, StyleValue::Number)
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// One presentational concern derived from one logical attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDirective {
    /// Logical attribute this came from, e.g. `textColor`.
    pub key: String,
    /// CSS property or custom property (`--name`) carrying the value.
    pub property: Option<String>,
    /// Reusable class applied when the value is set.
    pub class: Option<String>,
    pub value: StyleValue,
    /// Unit appended to numeric values.
    pub unit: Option<&'static str>,
}

impl StyleDirective {
    pub fn new(key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        Self {
            key: key.into(),
            property: None,
            class: None,
            value: value.into(),
            unit: None,
        }
    }

    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    fn resolved(&self) -> Option<String> {
        match self.unit {
            Some(unit) => self.value.css_with_unit(unit),
            None => self.value.css(),
        }
    }
}

/// Output of [`StyleSheet::build`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltStyle {
    /// Custom properties (`--name`) and their values.
    pub variables: Vec<(String, String)>,
    pub classes: Vec<String>,
    /// Ad hoc declarations for directives without a reusable class.
    pub declarations: Vec<(String, String)>,
}

impl BuiltStyle {
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// `prop:value;` pairs, custom properties first.
    pub fn inline_style(&self) -> String {
        self.variables
            .iter()
            .chain(self.declarations.iter())
            .map(|(k, v)| format!("{k}:{v};"))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.classes.is_empty() && self.declarations.is_empty()
    }

    /// Appends `other`, letting its properties replace ours.
    pub fn merge(&mut self, other: BuiltStyle) {
        for (k, v) in other.variables {
            upsert(&mut self.variables, k, v);
        }
        for (k, v) in other.declarations {
            upsert(&mut self.declarations, k, v);
        }
        for class in other.classes {
            push_class(&mut self.classes, class);
        }
    }
}

fn upsert(list: &mut Vec<(String, String)>, key: String, value: String) {
    match list.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => list.push((key, value)),
    }
}

fn push_class(classes: &mut Vec<String>, class: String) {
    if !class.is_empty() && !classes.contains(&class) {
        classes.push(class);
    }
}

/// Collects directives for one block.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    directives: Vec<StyleDirective>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, directive: StyleDirective) -> &mut Self {
        self.directives.push(directive);
        self
    }

    pub fn extend(&mut self, directives: impl IntoIterator<Item = StyleDirective>) -> &mut Self {
        self.directives.extend(directives);
        self
    }

    pub fn directives(&self) -> &[StyleDirective] {
        &self.directives
    }

    pub fn build(&self) -> BuiltStyle {
        let mut out = BuiltStyle::default();
        for directive in &self.directives {
            let Some(value) = directive.resolved() else {
                continue;
            };
            if let Some(class) = &directive.class {
                push_class(&mut out.classes, class.clone());
            }
            match &directive.property {
                Some(prop) if prop.starts_with("--") => {
                    upsert(&mut out.variables, prop.clone(), value);
                }
                Some(prop) if directive.class.is_none() => {
                    upsert(&mut out.declarations, prop.clone(), value);
                }
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unset_directive_contributes_nothing() {
        let mut sheet = StyleSheet::new();
        sheet
            .push(StyleDirective::new("a", StyleValue::None).class("has-a"))
            .push(StyleDirective::new("b", "").property("color"))
            .push(StyleDirective::new("c", "none").property("--c"))
            .push(StyleDirective::new("d", "0").property("opacity"));

        let built = sheet.build();
        assert!(built.is_empty());
        assert_eq!(built.inline_style(), "");
    }

    #[test]
    fn numeric_zero_still_renders() {
        let mut sheet = StyleSheet::new();
        sheet.push(StyleDirective::new("opacity", 0.0).property("opacity"));
        assert_eq!(sheet.build().inline_style(), "opacity:0;");
    }

    #[test]
    fn classes_and_variables_are_split() {
        let mut sheet = StyleSheet::new();
        sheet
            .push(
                StyleDirective::new("textColor", "var(--wp--preset--color--accent)")
                    .property("--bk-text-color")
                    .class("has-text-color"),
            )
            .push(StyleDirective::new("gap", 12i64).property("gap").unit("px"))
            .push(StyleDirective::new("rotation", 90i64).property("--bk-rotation").unit("deg"));

        let built = sheet.build();
        assert_eq!(built.classes, vec!["has-text-color".to_string()]);
        assert_eq!(built.variable("--bk-rotation"), Some("90deg"));
        assert_eq!(
            built.inline_style(),
            "--bk-text-color:var(--wp--preset--color--accent);--bk-rotation:90deg;gap:12px;"
        );
    }

    #[test]
    fn class_bearing_plain_property_is_not_inlined() {
        let mut sheet = StyleSheet::new();
        sheet.push(
            StyleDirective::new("align", "center")
                .property("text-align")
                .class("has-text-align-center"),
        );
        let built = sheet.build();
        assert_eq!(built.classes, vec!["has-text-align-center".to_string()]);
        assert!(built.declarations.is_empty());
    }

    #[test]
    fn later_directive_replaces_same_property() {
        let mut sheet = StyleSheet::new();
        sheet
            .push(StyleDirective::new("a", "red").property("color"))
            .push(StyleDirective::new("b", "blue").property("color"))
            .push(StyleDirective::new("c", "x").class("dup"))
            .push(StyleDirective::new("d", "y").class("dup"));

        let built = sheet.build();
        assert_eq!(built.inline_style(), "color:blue;");
        assert_eq!(built.classes, vec!["dup".to_string()]);
    }

    #[test]
    fn fractional_numbers_keep_their_decimals() {
        assert_eq!(StyleValue::Number(0.25).css().as_deref(), Some("0.25"));
        assert_eq!(StyleValue::Number(-3.0).css().as_deref(), Some("-3"));
    }

    #[test]
    fn merge_prefers_incoming_values() {
        let mut base = BuiltStyle {
            declarations: vec![("color".into(), "red".into())],
            ..Default::default()
        };
        base.merge(BuiltStyle {
            declarations: vec![("color".into(), "blue".into())],
            classes: vec!["x".into()],
            ..Default::default()
        });
        assert_eq!(base.inline_style(), "color:blue;");
        assert_eq!(base.classes, vec!["x".to_string()]);
    }
}
