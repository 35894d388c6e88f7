use serde::Serialize;
use serde_json::{Value, json};

use crate::blocks::context_fields;
use crate::cascade::{Fields, value_to_i64};
use crate::markup::Element;
use crate::render::{Block, BlockInput, BlockNode};

const TAB_BLOCK: &str = "tab";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TabsState {
    active_tab: usize,
}

#[derive(Debug, Serialize)]
struct TabState {
    tab: usize,
}

fn tab_label(node: &BlockNode) -> Option<&str> {
    node.attrs
        .get("label")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Tab strip plus panels. The active tab is 1-based among the children.
pub struct TabsBlock;

impl TabsBlock {
    fn labelled_tabs<'a>(input: &BlockInput<'a>) -> Vec<(usize, &'a str)> {
        input
            .children()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name == TAB_BLOCK)
            .filter_map(|(i, c)| tab_label(c).map(|label| (i + 1, label)))
            .collect()
    }

    /// Requested tab if it names a labelled tab, else the first one.
    fn active_tab(input: &BlockInput<'_>) -> usize {
        let tabs = Self::labelled_tabs(input);
        let requested = input
            .lookup()
            .field("activeTab")
            .i64()
            .filter(|n| *n > 0)
            .map(|n| n as usize);
        match requested {
            Some(n) if tabs.iter().any(|(i, _)| *i == n) => n,
            _ => tabs.first().map(|(i, _)| *i).unwrap_or(1),
        }
    }
}

impl Block for TabsBlock {
    fn name(&self) -> &'static str {
        "tabs"
    }

    fn provides_context(&self, input: &BlockInput<'_>) -> Option<Fields> {
        Some(context_fields([
            ("activeTab", Some(json!(Self::active_tab(input)))),
            ("tabsId", Some(json!(input.dom_id()))),
        ]))
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        let tabs = Self::labelled_tabs(input);
        if tabs.is_empty() || input.inner_html.is_empty() {
            return String::new();
        }
        let id = input.dom_id();
        let active = Self::active_tab(input);
        let ix = input.interactivity();
        let orientation = match input.lookup().field("orientation").string().as_deref() {
            Some("vertical") => "vertical",
            _ => "horizontal",
        };

        let mut list = Element::new("div").with(|a| {
            a.class(input.class("tabs__list"))
                .attr("role", "tablist")
                .aria("orientation", orientation)
        });
        for (index, label) in tabs {
            let is_active = index == active;
            let button = Element::new("button")
                .with(|a| {
                    a.id(format!("{id}-tab-{index}"))
                        .class(input.class("tabs__tab"))
                        .class_if(is_active, "is-active")
                        .attr("type", "button")
                        .attr("role", "tab")
                        .aria("selected", is_active.to_string())
                        .aria("controls", format!("{id}-panel-{index}"))
                        .data_pairs([
                            ix.context(&TabState { tab: index }),
                            ix.on("click", "actions.selectTab"),
                            ix.bind("aria-selected", "state.isActiveTab"),
                            ix.class_toggle("is-active", "state.isActiveTab"),
                        ])
                })
                .text(label);
            list = list.child(button);
        }

        Element::new("div")
            .with(|a| {
                a.id(id.clone())
                    .class(input.class("tabs"))
                    .class(input.class(&format!("tabs--{orientation}")))
                    .data_pairs([
                        ix.interactive(),
                        ix.context(&TabsState { active_tab: active }),
                    ])
            })
            .child(list)
            .html(input.inner_html)
            .render()
    }
}

pub struct TabBlock;

impl Block for TabBlock {
    fn name(&self) -> &'static str {
        TAB_BLOCK
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        if tab_label(input.node).is_none() {
            return String::new();
        }
        let ctx = input.context;
        let index = input.position.index;
        let tabs_id = ctx
            .get("tabs", "tabsId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| input.position.parent_dom_id(&input.options.class_prefix))
            .unwrap_or_else(|| input.dom_id());
        let active = ctx
            .get("tabs", "activeTab")
            .and_then(value_to_i64)
            .unwrap_or(1);
        let is_active = active == index as i64;
        let ix = input.interactivity();

        Element::new("div")
            .with(|a| {
                a.id(format!("{tabs_id}-panel-{index}"))
                    .class(input.class("tabs__panel"))
                    .class_if(is_active, "is-active")
                    .attr("role", "tabpanel")
                    .flag("hidden", !is_active)
                    .aria("labelledby", format!("{tabs_id}-tab-{index}"))
                    .data_pairs([
                        ix.context(&TabState { tab: index }),
                        ix.bind("hidden", "!state.isActiveTab"),
                    ])
            })
            .html(input.inner_html)
            .render()
    }
}
