//! Palette-aware color and gradient directives.
//!
//! A value is either a literal CSS color (`#0a0`, `rgb(...)`, `var(...)`) or
//! a palette slug such as `accent`. Slugs become `has-<slug>-<suffix>`
//! classes the theme stylesheet styles; literals are written inline.

use std::sync::OnceLock;

use regex::Regex;

use super::StyleDirective;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorKind {
    Literal(String),
    Preset(String),
}

const LITERAL_PREFIXES: &[&str] = &[
    "#",
    "rgb(",
    "rgba(",
    "hsl(",
    "hsla(",
    "hwb(",
    "lab(",
    "lch(",
    "oklab(",
    "oklch(",
    "color(",
    "color-mix(",
    "var(",
];

const KEYWORDS: &[&str] = &["transparent", "currentcolor", "inherit", "initial", "unset"];

impl ColorKind {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let lower = value.to_ascii_lowercase();
        if LITERAL_PREFIXES.iter().any(|p| lower.starts_with(p))
            || KEYWORDS.contains(&lower.as_str())
            || lower.contains("gradient(")
        {
            Some(ColorKind::Literal(value.to_string()))
        } else {
            let slug = slugify(value);
            (!slug.is_empty()).then_some(ColorKind::Preset(slug))
        }
    }
}

pub fn slugify(value: &str) -> String {
    static NON_SLUG: OnceLock<Regex> = OnceLock::new();
    let re = NON_SLUG.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("Invalid slug regex"));
    re.replace_all(&value.to_ascii_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Directives for one color attribute.
///
/// `property` receives the value: a plain CSS property (`color`) or a custom
/// property (`--bk-icon-color`). Presets only reach a plain property through
/// their class; a custom property gets `var(--wp--preset--color--<slug>)`.
/// Any set color adds the `has-<suffix>` marker class.
pub fn color_directive(
    key: &str,
    color: Option<&str>,
    property: &str,
    suffix: &str,
) -> Vec<StyleDirective> {
    let Some(kind) = color.and_then(ColorKind::parse) else {
        return Vec::new();
    };
    let marker = StyleDirective::new(key, "set").class(format!("has-{suffix}"));
    match kind {
        ColorKind::Literal(value) => vec![
            marker,
            StyleDirective::new(key, value.as_str()).property(property),
        ],
        ColorKind::Preset(slug) => {
            let mut out = vec![
                marker,
                StyleDirective::new(key, slug.as_str()).class(format!("has-{slug}-{suffix}")),
            ];
            if property.starts_with("--") {
                out.push(
                    StyleDirective::new(key, format!("var(--wp--preset--color--{slug})").as_str())
                        .property(property),
                );
            }
            out
        }
    }
}

/// Directives for a background gradient attribute.
pub fn gradient_directive(key: &str, gradient: Option<&str>) -> Vec<StyleDirective> {
    let Some(kind) = gradient.and_then(ColorKind::parse) else {
        return Vec::new();
    };
    let marker = StyleDirective::new(key, "set").class("has-background");
    match kind {
        ColorKind::Literal(value) => vec![
            marker,
            StyleDirective::new(key, value.as_str()).property("background"),
        ],
        ColorKind::Preset(slug) => vec![
            marker,
            StyleDirective::new(key, slug.as_str())
                .class(format!("has-{slug}-gradient-background")),
        ],
    }
}
