use html_escape::encode_double_quoted_attribute;

use crate::style::BuiltStyle;

/// The flattened attribute set handed to markup composition.
///
/// Rendering order is fixed: `id`, `class`, `style`, other attributes in
/// insertion order, then `aria-*`, then `data-*`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationAttributes {
    id: Option<String>,
    classes: Vec<String>,
    style: BuiltStyle,
    other: Vec<(String, String)>,
    aria: Vec<(String, String)>,
    data: Vec<(String, String)>,
}

impl PresentationAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.push_class(class);
        self
    }

    pub fn class_if(self, condition: bool, class: impl Into<String>) -> Self {
        if condition { self.class(class) } else { self }
    }

    pub fn push_class(&mut self, class: impl Into<String>) {
        for part in class.into().split_whitespace() {
            if !self.classes.iter().any(|c| c == part) {
                self.classes.push(part.to_string());
            }
        }
    }

    /// Merges classes and inline declarations from a built style.
    pub fn style(mut self, style: BuiltStyle) -> Self {
        for class in &style.classes {
            self.push_class(class.as_str());
        }
        self.style.merge(BuiltStyle {
            classes: Vec::new(),
            ..style
        });
        self
    }

    /// `aria-<name>`; `name` is given without the prefix.
    pub fn aria(mut self, name: &str, value: impl Into<String>) -> Self {
        set(&mut self.aria, format!("aria-{name}"), value.into());
        self
    }

    /// A raw `data-*` attribute; `name` includes the `data-` prefix.
    pub fn data(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set(&mut self.data, name.into(), value.into());
        self
    }

    pub fn data_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        for (name, value) in pairs {
            set(&mut self.data, name, value);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set(&mut self.other, name.into(), value.into());
        self
    }

    /// Boolean attribute such as `hidden`, rendered without a value.
    pub fn flag(self, name: &str, on: bool) -> Self {
        if on { self.attr(name, "") } else { self }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.other
            .iter()
            .chain(self.aria.iter())
            .chain(self.data.iter())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn inline_style(&self) -> String {
        self.style.inline_style()
    }

    /// Renders ` name="value"` pairs with escaped values.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(id) = &self.id {
            push_attr(&mut out, "id", id);
        }
        if !self.classes.is_empty() {
            push_attr(&mut out, "class", &self.classes.join(" "));
        }
        let style = self.style.inline_style();
        if !style.is_empty() {
            push_attr(&mut out, "style", &style);
        }
        for (name, value) in self.other.iter().chain(&self.aria).chain(&self.data) {
            if value.is_empty() && !name.starts_with("data-") && !name.starts_with("aria-") {
                out.push(' ');
                out.push_str(name);
            } else {
                push_attr(&mut out, name, value);
            }
        }
        out
    }
}

fn set(list: &mut Vec<(String, String)>, name: String, value: String) {
    match list.iter_mut().find(|(k, _)| *k == name) {
        Some(slot) => slot.1 = value,
        None => list.push((name, value)),
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}
