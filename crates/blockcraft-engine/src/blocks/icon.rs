use serde_json::Value;

use crate::attributes::PresentationAttributes;
use crate::blocks::context_fields;
use crate::cascade::{Fields, value_to_f64};
use crate::markup::Element;
use crate::render::{Block, BlockInput};
use crate::style::{StyleDirective, StyleSheet, color::slugify, color_directive};

const DEFAULT_ICON_SIZE: f64 = 24.0;

/// Groups icons and sets their shared color and size.
pub struct IconListBlock;

impl Block for IconListBlock {
    fn name(&self) -> &'static str {
        "icon-list"
    }

    fn provides_context(&self, input: &BlockInput<'_>) -> Option<Fields> {
        let lookup = input.lookup();
        Some(context_fields([
            ("iconColor", lookup.field("iconColor").nearest("iconColor").value().cloned()),
            ("iconSize", lookup.field("iconSize").nearest("iconSize").value().cloned()),
        ]))
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        if input.inner_html.is_empty() {
            return String::new();
        }
        let lookup = input.lookup();
        let mut sheet = StyleSheet::new();
        sheet.push(
            StyleDirective::new("gap", lookup.own("gap").and_then(value_to_f64))
                .property("--bk-icon-list-gap")
                .unit("px"),
        );
        Element::new("div")
            .with(|a| a.class(input.class("icon-list")).style(sheet.build()))
            .html(input.inner_html)
            .render()
    }
}

pub struct IconBlock;

impl Block for IconBlock {
    fn name(&self) -> &'static str {
        "icon"
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        let lookup = input.lookup();
        let Some(icon) = lookup.field("icon").string().map(|s| slugify(&s)) else {
            return String::new();
        };
        if icon.is_empty() {
            return String::new();
        }

        let size = lookup
            .field("size")
            .nearest("iconSize")
            .f64_or(DEFAULT_ICON_SIZE);
        let color = lookup.field("color").nearest("iconColor").string();
        let background = lookup.own("backgroundColor").and_then(Value::as_str);
        // Zero rotation is the identity transform, so it is left out.
        let rotation = lookup
            .field("rotation")
            .value()
            .and_then(value_to_f64)
            .filter(|deg| *deg % 360.0 != 0.0);

        let mut sheet = StyleSheet::new();
        sheet
            .push(
                StyleDirective::new("size", size)
                    .property("--bk-icon-size")
                    .unit("px"),
            )
            .extend(color_directive(
                "color",
                color.as_deref(),
                "--bk-icon-color",
                "icon-color",
            ))
            .extend(color_directive(
                "backgroundColor",
                background,
                "--bk-icon-background",
                "icon-background",
            ))
            .push(
                StyleDirective::new("rotation", rotation)
                    .property("--bk-icon-rotation")
                    .unit("deg"),
            );

        let attrs = PresentationAttributes::new()
            .class(input.class("icon"))
            .class(input.class(&format!("icon--{icon}")))
            .class_if(
                lookup.field("flipHorizontal").bool_or(false),
                input.class("icon--flip"),
            )
            .style(sheet.build());
        let attrs = match lookup.field("label").string() {
            Some(label) => attrs.attr("role", "img").aria("label", label),
            None => attrs.aria("hidden", "true"),
        };

        let sprite = format!("#{}", input.class(&format!("icon-{icon}")));
        let glyph = Element::new("svg")
            .with(|a| a.attr("focusable", "false"))
            .child(Element::new("use").with(|a| a.attr("href", sprite)));

        let span = Element::new("span").attrs(attrs).child(glyph);
        match lookup.field("url").string() {
            Some(url) => Element::new("a")
                .with(|a| a.class(input.class("icon__link")).attr("href", url))
                .child(span)
                .render(),
            None => span.render(),
        }
    }
}
