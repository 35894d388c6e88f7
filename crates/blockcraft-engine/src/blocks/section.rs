use crate::attributes::PresentationAttributes;
use crate::blocks::context_fields;
use crate::cascade::{Fields, value_to_i64};
use crate::markup::Element;
use crate::render::{Block, BlockInput};
use crate::style::{StyleDirective, StyleSheet, color_directive, gradient_directive};

const TAGS: &[&str] = &["div", "section", "main", "aside", "header", "footer", "article"];

/// Generic container. Its colors become the defaults for everything inside.
pub struct SectionBlock;

impl Block for SectionBlock {
    fn name(&self) -> &'static str {
        "section"
    }

    fn provides_context(&self, input: &BlockInput<'_>) -> Option<Fields> {
        let lookup = input.lookup();
        let inherited = |key: &str| lookup.field(key).ancestor("section", key).value().cloned();
        Some(context_fields([
            ("textColor", inherited("textColor")),
            ("backgroundColor", inherited("backgroundColor")),
            ("gradient", inherited("gradient")),
        ]))
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        if input.inner_html.trim().is_empty() {
            return String::new();
        }
        let lookup = input.lookup();
        let tag = lookup.field("tagName").string_or("div");
        let tag = if TAGS.contains(&tag.as_str()) { tag } else { "div".to_string() };

        // Only the section's own colors are painted here; inherited ones are
        // already painted by the ancestor that owns them.
        let own = |key: &str| lookup.own(key).and_then(|v| v.as_str());

        let mut sheet = StyleSheet::new();
        sheet
            .extend(color_directive("textColor", own("textColor"), "color", "text-color"))
            .extend(color_directive(
                "backgroundColor",
                own("backgroundColor"),
                "background-color",
                "background-color",
            ))
            .extend(gradient_directive("gradient", own("gradient")))
            .push(
                StyleDirective::new("padding", lookup.own("padding").map(padding_value))
                    .property("padding"),
            )
            .push(
                StyleDirective::new("minHeight", lookup.own("minHeight").and_then(value_to_i64))
                    .property("min-height")
                    .unit("px"),
            );

        let attrs = PresentationAttributes::new()
            .class(input.class("section"))
            .style(sheet.build());
        let attrs = match lookup.field("anchor").string() {
            Some(anchor) => attrs.id(anchor),
            None => attrs,
        };

        Element::new(tag).attrs(attrs).html(input.inner_html).render()
    }
}

fn padding_value(value: &serde_json::Value) -> String {
    match value_to_i64(value) {
        Some(px) => format!("{px}px"),
        None => value.as_str().unwrap_or_default().to_string(),
    }
}
