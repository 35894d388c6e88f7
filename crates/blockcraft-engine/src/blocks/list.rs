//! Ordered and unordered lists with server-computed markers.
//!
//! The list resolves its numbering once (the start value depends on how many
//! items it holds) and hands the result to its items through context, along
//! with each child's ordinal. Only items that will render get an ordinal, so
//! a suppressed item leaves no gap in the numbering.

use serde_json::{Value, json};

use crate::attributes::PresentationAttributes;
use crate::blocks::context_fields;
use crate::cascade::{Fields, value_to_i64, value_to_string};
use crate::markup::Element;
use crate::numbering::{ListNumbering, NumberingStyle};
use crate::render::{Block, BlockInput, BlockNode};
use crate::style::{StyleDirective, StyleSheet, color_directive};

const DEFAULT_BULLET: &str = "\u{2022}";
const ITEM_BLOCK: &str = "list-item";

/// Whether a `list-item` node produces markup: it needs text, host inner
/// HTML or child blocks.
fn item_renders(node: &BlockNode) -> bool {
    node.name == ITEM_BLOCK
        && (node.attrs.get("text").and_then(value_to_string).is_some()
            || node.inner_html.as_deref().is_some_and(|h| !h.trim().is_empty())
            || !node.inner_blocks.is_empty())
}

pub struct ListBlock;

impl ListBlock {
    /// 1-based ordinal per child, `null` for children that are not
    /// rendered list items.
    fn ordinals(input: &BlockInput<'_>) -> Vec<Value> {
        let mut next = 0;
        input
            .children()
            .iter()
            .map(|child| {
                if item_renders(child) {
                    next += 1;
                    json!(next)
                } else {
                    Value::Null
                }
            })
            .collect()
    }

    fn numbering(input: &BlockInput<'_>) -> ListNumbering {
        let lookup = input.lookup();
        let items = input.children().iter().filter(|c| item_renders(c)).count() as i64;
        ListNumbering::new(
            lookup.own("start"),
            lookup.field("reversed").bool_or(false),
            items,
            NumberingStyle::parse_lenient(&lookup.field("numberingStyle").string_or("decimal")),
        )
    }
}

impl Block for ListBlock {
    fn name(&self) -> &'static str {
        "list"
    }

    fn provides_context(&self, input: &BlockInput<'_>) -> Option<Fields> {
        let lookup = input.lookup();
        let ordered = lookup.field("ordered").bool_or(false);
        let numbering = Self::numbering(input);
        Some(context_fields([
            ("ordered", Some(Value::Bool(ordered))),
            ("start", Some(json!(numbering.start))),
            ("reversed", Some(Value::Bool(numbering.reversed))),
            ("numberingStyle", Some(json!(numbering.style.as_str()))),
            ("ordinals", Some(Value::Array(Self::ordinals(input)))),
            (
                "bullet",
                Some(json!(lookup.field("bullet").string_or(DEFAULT_BULLET))),
            ),
            (
                "markerColor",
                lookup.field("markerColor").ancestor("list", "markerColor").value().cloned(),
            ),
        ]))
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        if input.inner_html.is_empty() {
            return String::new();
        }
        let lookup = input.lookup();
        let ordered = lookup.field("ordered").bool_or(false);
        let numbering = Self::numbering(input);

        let mut sheet = StyleSheet::new();
        sheet
            .extend(color_directive(
                "textColor",
                lookup.own("textColor").and_then(Value::as_str),
                "color",
                "text-color",
            ))
            .push(
                StyleDirective::new("gap", lookup.own("gap").and_then(value_to_i64))
                    .property("--bk-list-gap")
                    .unit("px"),
            );

        let attrs = PresentationAttributes::new()
            .class(input.class("list"))
            .class_if(
                ordered,
                input.class(&format!("list--{}", numbering.style.as_str())),
            )
            .style(sheet.build())
            .attr("role", "list");

        let tag = if ordered { "ol" } else { "ul" };
        Element::new(tag).attrs(attrs).html(input.inner_html).render()
    }
}

pub struct ListItemBlock;

impl ListItemBlock {
    fn marker(input: &BlockInput<'_>) -> String {
        let ctx = input.context;
        let ordered = ctx
            .get("list", "ordered")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !ordered {
            return ctx
                .get("list", "bullet")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_BULLET)
                .to_string();
        }
        let numbering = ListNumbering {
            start: ctx
                .get("list", "start")
                .and_then(value_to_i64)
                .unwrap_or(1),
            reversed: ctx
                .get("list", "reversed")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            style: ctx
                .get("list", "numberingStyle")
                .and_then(Value::as_str)
                .map(NumberingStyle::parse_lenient)
                .unwrap_or_default(),
        };
        let ordinal = ctx
            .get("list", "ordinals")
            .and_then(|ordinals| ordinals.get(input.position.index.saturating_sub(1)))
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(input.position.index);
        numbering.marker(ordinal)
    }
}

impl Block for ListItemBlock {
    fn name(&self) -> &'static str {
        ITEM_BLOCK
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        if !item_renders(input.node) {
            return String::new();
        }
        let lookup = input.lookup();
        let text = lookup.field("text").string();

        let marker_color = lookup
            .field("markerColor")
            .ancestor("list", "markerColor")
            .string();
        let mut marker_sheet = StyleSheet::new();
        marker_sheet.extend(color_directive(
            "markerColor",
            marker_color.as_deref(),
            "--bk-marker-color",
            "marker-color",
        ));

        let marker = Element::new("span")
            .with(|a| {
                a.class(input.class("list-item__marker"))
                    .style(marker_sheet.build())
                    .aria("hidden", "true")
            })
            .text(&Self::marker(input));

        let body = text.map(|text| {
            Element::new("span")
                .with(|a| a.class(input.class("list-item__text")))
                .text(&text)
        });

        Element::new("li")
            .with(|a| a.class(input.class("list-item")))
            .child(marker)
            .child_if(body)
            .html(input.inner_html)
            .render()
    }
}

#[cfg(test)]
mod tests {
    use crate::blocks::test_support::{node, render};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn items(n: usize) -> Vec<crate::render::BlockNode> {
        (1..=n)
            .map(|i| node("list-item", json!({"text": format!("item {i}")})))
            .collect()
    }

    fn markers(html: &str) -> Vec<String> {
        html.split(r#"aria-hidden="true">"#)
            .skip(1)
            .map(|rest| rest.split('<').next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn ordered_list_numbers_items() {
        let mut list = node("list", json!({"ordered": true}));
        list.inner_blocks = items(3);
        assert_eq!(markers(&render(&list)), vec!["1.", "2.", "3."]);
    }

    #[test]
    fn reversed_list_counts_down_from_item_count() {
        let mut list = node(
            "list",
            json!({"ordered": true, "reversed": true, "numberingStyle": "upper-roman"}),
        );
        list.inner_blocks = items(3);
        assert_eq!(markers(&render(&list)), vec!["III.", "II.", "I."]);
    }

    #[test]
    fn explicit_start_and_alpha_style() {
        let mut list = node(
            "list",
            json!({"ordered": true, "start": "2", "numberingStyle": "lower-alpha"}),
        );
        list.inner_blocks = items(2);
        assert_eq!(markers(&render(&list)), vec!["b.", "c."]);
    }

    #[test]
    fn unordered_list_uses_bullets() {
        let mut list = node("list", json!({"bullet": "-"}));
        list.inner_blocks = items(2);
        let html = render(&list);
        assert!(html.starts_with(r#"<ul class="bk-list" role="list">"#));
        assert_eq!(markers(&html), vec!["-", "-"]);
    }

    #[test]
    fn nested_list_keeps_its_own_numbering() {
        let mut inner = node("list", json!({"ordered": true, "numberingStyle": "lower-roman"}));
        inner.inner_blocks = items(2);
        let mut parent_item = node("list-item", json!({"text": "parent"}));
        parent_item.inner_blocks = vec![inner];
        let mut outer = node("list", json!({"ordered": true, "start": 5}));
        outer.inner_blocks = vec![parent_item];

        assert_eq!(markers(&render(&outer)), vec!["5.", "i.", "ii."]);
    }

    #[test]
    fn full_item_markup() {
        let mut list = node("list", json!({"ordered": true, "markerColor": "#f00"}));
        list.inner_blocks = vec![node("list-item", json!({"text": "a & b"}))];
        assert_eq!(
            render(&list),
            concat!(
                r#"<ol class="bk-list bk-list--decimal" role="list">"#,
                r#"<li class="bk-list-item">"#,
                r#"<span class="bk-list-item__marker has-marker-color" style="--bk-marker-color:#f00;" aria-hidden="true">1.</span>"#,
                r#"<span class="bk-list-item__text">a &amp; b</span>"#,
                r#"</li></ol>"#
            )
        );
    }

    #[test]
    fn empty_items_and_lists_are_suppressed() {
        let mut list = node("list", json!({"ordered": true}));
        list.inner_blocks = vec![node("list-item", json!({"text": ""}))];
        assert_eq!(render(&list), "");
    }

    fn texts(labels: &[&str]) -> Vec<crate::render::BlockNode> {
        labels
            .iter()
            .map(|t| node("list-item", json!({"text": t})))
            .collect()
    }

    #[test]
    fn suppressed_item_leaves_no_gap() {
        let mut list = node("list", json!({"ordered": true}));
        list.inner_blocks = texts(&["", "a", "b"]);
        assert_eq!(markers(&render(&list)), vec!["1.", "2."]);
    }

    #[test]
    fn reversed_list_counts_only_rendered_items() {
        let mut list = node("list", json!({"ordered": true, "reversed": true}));
        list.inner_blocks = texts(&["a", "b", ""]);
        assert_eq!(markers(&render(&list)), vec!["2.", "1."]);
    }

    #[test]
    fn non_item_children_do_not_take_a_number() {
        let mut list = node("list", json!({"ordered": true}));
        list.inner_blocks = texts(&["a", "b"]);
        list.inner_blocks
            .insert(1, node("separator", json!({})).inner_html("<hr>"));
        let html = render(&list);
        assert_eq!(markers(&html), vec!["1.", "2."]);
        assert!(html.contains("<hr>"));
    }
}
