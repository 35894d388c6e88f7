//! Accordion container, items and their collapsible detail regions.
//!
//! Open/closed state lives in the client runtime. The server only emits the
//! initial state and the bindings that keep `aria-expanded`, `hidden` and the
//! `is-open` class in sync with it.

use serde::Serialize;
use serde_json::{Value, json};

use crate::attributes::PresentationAttributes;
use crate::blocks::context_fields;
use crate::cascade::Fields;
use crate::markup::Element;
use crate::render::{Block, BlockInput};

const DETAILS_BLOCK: &str = "accordion-details";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccordionState {
    allow_multiple: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemState {
    is_open: bool,
}

pub struct AccordionBlock;

impl Block for AccordionBlock {
    fn name(&self) -> &'static str {
        "accordion"
    }

    fn provides_context(&self, input: &BlockInput<'_>) -> Option<Fields> {
        let lookup = input.lookup();
        Some(context_fields([
            (
                "allowMultiple",
                Some(Value::Bool(lookup.field("allowMultiple").bool_or(false))),
            ),
            ("openByDefault", lookup.own("openByDefault").cloned()),
            (
                "headingLevel",
                Some(json!(heading_level(lookup.field("headingLevel").i64_or(3)))),
            ),
        ]))
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        if input.inner_html.is_empty() {
            return String::new();
        }
        let ix = input.interactivity();
        let state = AccordionState {
            allow_multiple: input.lookup().field("allowMultiple").bool_or(false),
        };
        Element::new("div")
            .with(|a| {
                a.class(input.class("accordion"))
                    .data_pairs([ix.interactive(), ix.context(&state)])
            })
            .html(input.inner_html)
            .render()
    }
}

fn heading_level(level: i64) -> i64 {
    level.clamp(2, 6)
}

pub struct AccordionItemBlock;

impl AccordionItemBlock {
    /// Own value first, so an item set to `false` stays closed even when
    /// the accordion opens items by default.
    fn is_open(input: &BlockInput<'_>) -> bool {
        input
            .lookup()
            .field("openByDefault")
            .ancestor("accordion", "openByDefault")
            .bool_or(false)
    }
}

impl Block for AccordionItemBlock {
    fn name(&self) -> &'static str {
        "accordion-item"
    }

    fn provides_context(&self, input: &BlockInput<'_>) -> Option<Fields> {
        Some(context_fields([
            ("itemId", Some(json!(input.dom_id()))),
            ("isOpen", Some(Value::Bool(Self::is_open(input)))),
        ]))
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        let lookup = input.lookup();
        let Some(title) = lookup.field("title").string() else {
            log::debug!("accordion-item without a title");
            return String::new();
        };
        if !input.node.has_child(DETAILS_BLOCK) || input.inner_html.is_empty() {
            log::debug!("accordion-item '{title}' has no details section");
            return String::new();
        }

        let id = input.dom_id();
        let is_open = Self::is_open(input);
        let ix = input.interactivity();
        let level = heading_level(
            input
                .context
                .get("accordion", "headingLevel")
                .and_then(Value::as_i64)
                .unwrap_or(3),
        );

        let toggle = Element::new("button")
            .with(|a| {
                a.id(format!("{id}-button"))
                    .class(input.class("accordion-item__toggle"))
                    .attr("type", "button")
                    .aria("expanded", is_open.to_string())
                    .aria("controls", format!("{id}-panel"))
                    .data_pairs([
                        ix.on("click", "actions.toggle"),
                        ix.bind("aria-expanded", "context.isOpen"),
                    ])
            })
            .child(
                Element::new("span")
                    .with(|a| a.class(input.class("accordion-item__title")))
                    .text(&title),
            )
            .child(Element::new("span").with(|a| {
                a.class(input.class("accordion-item__icon"))
                    .aria("hidden", "true")
            }));

        let heading = Element::new(format!("h{level}"))
            .with(|a| a.class(input.class("accordion-item__heading")))
            .child(toggle);

        let attrs = PresentationAttributes::new()
            .class(input.class("accordion-item"))
            .class_if(is_open, "is-open")
            .data_pairs([
                ix.context(&ItemState { is_open }),
                ix.class_toggle("is-open", "context.isOpen"),
            ]);

        Element::new("div")
            .attrs(attrs)
            .child(heading)
            .html(input.inner_html)
            .render()
    }
}

pub struct AccordionDetailsBlock;

impl Block for AccordionDetailsBlock {
    fn name(&self) -> &'static str {
        DETAILS_BLOCK
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        if input.inner_html.trim().is_empty() {
            return String::new();
        }
        let ctx = input.context;
        let Some(item_id) = ctx.get("accordion-item", "itemId").and_then(Value::as_str) else {
            log::debug!("accordion-details outside an accordion-item");
            return String::new();
        };
        let is_open = ctx
            .get("accordion-item", "isOpen")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let ix = input.interactivity();

        Element::new("div")
            .with(|a| {
                a.id(format!("{item_id}-panel"))
                    .class(input.class("accordion-details"))
                    .attr("role", "region")
                    .flag("hidden", !is_open)
                    .aria("labelledby", format!("{item_id}-button"))
                    .data_pairs([ix.bind("hidden", "!context.isOpen")])
            })
            .html(input.inner_html)
            .render()
    }
}
