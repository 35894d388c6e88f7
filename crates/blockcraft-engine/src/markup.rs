use html_escape::encode_text;

use crate::attributes::PresentationAttributes;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "source"];

/// A single HTML element with escaped text or trusted inner HTML.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: PresentationAttributes,
    children: String,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: PresentationAttributes::new(),
            children: String::new(),
        }
    }

    pub fn attrs(mut self, attrs: PresentationAttributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Adjusts the current attributes in place.
    pub fn with(mut self, f: impl FnOnce(PresentationAttributes) -> PresentationAttributes) -> Self {
        self.attrs = f(std::mem::take(&mut self.attrs));
        self
    }

    /// Appends text, escaping it.
    pub fn text(mut self, text: &str) -> Self {
        self.children.push_str(&encode_text(text));
        self
    }

    /// Appends markup that is already rendered.
    pub fn html(mut self, html: &str) -> Self {
        self.children.push_str(html);
        self
    }

    pub fn child(self, child: Element) -> Self {
        let rendered = child.render();
        self.html(&rendered)
    }

    pub fn child_if(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn render(&self) -> String {
        let attrs = self.attrs.render();
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return format!("<{}{attrs}>", self.tag);
        }
        format!("<{tag}{attrs}>{}</{tag}>", self.children, tag = self.tag)
    }
}
