//! Animated number counters.
//!
//! The final value is rendered server-side so the number is correct without
//! the client runtime; the runtime counts up from `start` on init.

use serde::Serialize;
use serde_json::Value;

use crate::attributes::PresentationAttributes;
use crate::blocks::context_fields;
use crate::cascade::{Fields, value_to_f64, value_to_i64};
use crate::markup::Element;
use crate::render::{Block, BlockInput};
use crate::style::{StyleSheet, color_directive};

const DEFAULT_DURATION_MS: i64 = 2000;
const DEFAULT_SEPARATOR: &str = ",";

/// Shares colors and animation settings with its counters.
pub struct CountersBlock;

impl Block for CountersBlock {
    fn name(&self) -> &'static str {
        "counters"
    }

    fn provides_context(&self, input: &BlockInput<'_>) -> Option<Fields> {
        let lookup = input.lookup();
        let own = |key: &str| lookup.own(key).cloned();
        Some(context_fields([
            ("textColor", own("textColor")),
            ("prefixColor", own("prefixColor")),
            ("suffixColor", own("suffixColor")),
            ("duration", own("duration")),
            ("separator", own("separator")),
        ]))
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        if input.inner_html.is_empty() {
            return String::new();
        }
        Element::new("div")
            .with(|a| a.class(input.class("counters")))
            .html(input.inner_html)
            .render()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CounterState {
    start: f64,
    end: f64,
    decimals: u32,
    duration: i64,
    separator: String,
}

pub struct CounterBlock;

impl Block for CounterBlock {
    fn name(&self) -> &'static str {
        "counter"
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        let lookup = input.lookup();
        let Some(end) = lookup.field("number").value().and_then(value_to_f64) else {
            return String::new();
        };
        if !end.is_finite() {
            return String::new();
        }

        let decimals = lookup.field("decimals").i64_or(0).clamp(0, 6) as u32;
        let separator = lookup
            .field("separator")
            .ancestor("counters", "separator")
            .value()
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_SEPARATOR)
            .to_string();
        let state = CounterState {
            start: lookup.field("start").f64_or(0.0),
            end,
            decimals,
            duration: lookup
                .field("duration")
                .ancestor("counters", "duration")
                .value()
                .and_then(value_to_i64)
                .filter(|d| *d >= 0)
                .unwrap_or(DEFAULT_DURATION_MS),
            separator,
        };

        let text_color = lookup
            .field("textColor")
            .ancestor("counters", "textColor")
            .string();
        // Prefix and suffix colors are set group-wide: the group's value wins
        // over the counter's own.
        let prefix_color = lookup
            .field("prefixColor")
            .ancestor("counters", "prefixColor")
            .ancestor_first()
            .string();
        let suffix_color = lookup
            .field("suffixColor")
            .ancestor("counters", "suffixColor")
            .ancestor_first()
            .string();

        let mut sheet = StyleSheet::new();
        sheet.extend(color_directive(
            "textColor",
            text_color.as_deref(),
            "color",
            "text-color",
        ));

        let ix = input.interactivity();
        let attrs = PresentationAttributes::new()
            .class(input.class("counter"))
            .style(sheet.build())
            .data_pairs([
                ix.interactive(),
                ix.context(&state),
                ix.init("callbacks.countUp"),
            ]);

        let affix = |name: &str, text: Option<String>, color: Option<String>| {
            text.map(|text| {
                let mut sheet = StyleSheet::new();
                sheet.extend(color_directive(name, color.as_deref(), "color", "text-color"));
                Element::new("span")
                    .with(|a| {
                        a.class(input.class(&format!("counter__{name}")))
                            .style(sheet.build())
                    })
                    .text(&text)
            })
        };

        let number = Element::new("span")
            .with(|a| {
                a.class(input.class("counter__number"))
                    .aria("live", "polite")
            })
            .text(&format_grouped(end, decimals, &state.separator));

        let label = lookup.field("label").string().map(|label| {
            Element::new("span")
                .with(|a| a.class(input.class("counter__label")))
                .text(&label)
        });

        Element::new("div")
            .attrs(attrs)
            .child_if(affix("prefix", lookup.field("prefix").string(), prefix_color))
            .child(number)
            .child_if(affix("suffix", lookup.field("suffix").string(), suffix_color))
            .child_if(label)
            .render()
    }
}

/// Formats `value` with a fixed number of decimals and grouped thousands.
pub fn format_grouped(value: f64, decimals: u32, separator: &str) -> String {
    let fixed = format!("{:.*}", decimals as usize, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
