//! Ordered-list marker computation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::cascade::value_to_i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberingStyle {
    #[default]
    Decimal,
    DecimalLeadingZero,
    UpperAlpha,
    LowerAlpha,
    UpperRoman,
    LowerRoman,
}

impl NumberingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberingStyle::Decimal => "decimal",
            NumberingStyle::DecimalLeadingZero => "decimal-leading-zero",
            NumberingStyle::UpperAlpha => "upper-alpha",
            NumberingStyle::LowerAlpha => "lower-alpha",
            NumberingStyle::UpperRoman => "upper-roman",
            NumberingStyle::LowerRoman => "lower-roman",
        }
    }

    /// Parses a style name, treating anything unknown as `decimal`.
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Token for `value` without the trailing period.
    pub fn format(&self, value: i64) -> String {
        match self {
            NumberingStyle::Decimal => value.to_string(),
            NumberingStyle::DecimalLeadingZero => {
                if (1..=9).contains(&value) {
                    format!("0{value}")
                } else {
                    value.to_string()
                }
            }
            NumberingStyle::UpperAlpha => alpha(value).unwrap_or_else(|| value.to_string()),
            NumberingStyle::LowerAlpha => alpha(value)
                .map(|s| s.to_ascii_lowercase())
                .unwrap_or_else(|| value.to_string()),
            NumberingStyle::UpperRoman => roman(value).unwrap_or_else(|| value.to_string()),
            NumberingStyle::LowerRoman => roman(value)
                .map(|s| s.to_ascii_lowercase())
                .unwrap_or_else(|| value.to_string()),
        }
    }
}

impl fmt::Display for NumberingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown numbering style: {0}")]
pub struct UnknownNumberingStyle(pub String);

impl FromStr for NumberingStyle {
    type Err = UnknownNumberingStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decimal" => Ok(NumberingStyle::Decimal),
            "decimal-leading-zero" => Ok(NumberingStyle::DecimalLeadingZero),
            "upper-alpha" => Ok(NumberingStyle::UpperAlpha),
            "lower-alpha" => Ok(NumberingStyle::LowerAlpha),
            "upper-roman" => Ok(NumberingStyle::UpperRoman),
            "lower-roman" => Ok(NumberingStyle::LowerRoman),
            other => Err(UnknownNumberingStyle(other.to_string())),
        }
    }
}

fn alpha(value: i64) -> Option<String> {
    if !(1..=26).contains(&value) {
        return None;
    }
    let c = (b'A' + (value - 1) as u8) as char;
    Some(c.to_string())
}

const ROMAN: [(i64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Largest value with a standard roman form; anything above is shown as digits.
const ROMAN_MAX: i64 = 3999;

fn roman(mut value: i64) -> Option<String> {
    if !(1..=ROMAN_MAX).contains(&value) {
        return None;
    }
    let mut out = String::new();
    for (amount, symbol) in ROMAN {
        while value >= amount {
            out.push_str(symbol);
            value -= amount;
        }
    }
    Some(out)
}

/// Numbering parameters for one ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListNumbering {
    pub start: i64,
    pub reversed: bool,
    pub style: NumberingStyle,
}

impl ListNumbering {
    /// Resolves the effective start value.
    ///
    /// An explicit start is honoured only when it is a positive number (or a
    /// numeric string). Otherwise reversed lists count down from the item
    /// count and forward lists start at 1. Item counts below 1 count as 1.
    pub fn new(
        start: Option<&Value>,
        reversed: bool,
        total_items: i64,
        style: NumberingStyle,
    ) -> Self {
        let total_items = total_items.max(1);
        let start = match start.and_then(value_to_i64) {
            Some(n) if n > 0 => n,
            _ if reversed => total_items,
            _ => 1,
        };
        Self {
            start,
            reversed,
            style,
        }
    }

    /// Numeric value at 1-based `index`, clamped to the `i64` range.
    pub fn value_at(&self, index: usize) -> i64 {
        let offset = i64::try_from(index.saturating_sub(1)).unwrap_or(i64::MAX);
        if self.reversed {
            self.start.saturating_sub(offset)
        } else {
            self.start.saturating_add(offset)
        }
    }

    /// Display marker for 1-based `index`, e.g. `"iv."`.
    pub fn marker(&self, index: usize) -> String {
        format!("{}.", self.style.format(self.value_at(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn numbering(start: Option<Value>, reversed: bool, total: i64, style: &str) -> ListNumbering {
        ListNumbering::new(
            start.as_ref(),
            reversed,
            total,
            NumberingStyle::parse_lenient(style),
        )
    }

    #[rstest]
    #[case(1, Some(json!(1)), false, 1, "decimal", "1.")]
    #[case(3, Some(json!(3)), true, 3, "decimal", "1.")]
    #[case(2, Some(json!(1)), false, 2, "upper-alpha", "B.")]
    #[case(4, None, false, 4, "lower-roman", "iv.")]
    #[case(27, None, false, 30, "upper-alpha", "27.")]
    #[case(3, None, false, 3, "lower-alpha", "c.")]
    #[case(1, None, false, 1, "decimal-leading-zero", "01.")]
    #[case(10, None, false, 10, "decimal-leading-zero", "10.")]
    #[case(1, Some(json!(1994)), false, 1, "upper-roman", "MCMXCIV.")]
    #[case(1, None, false, 1, "not-a-style", "1.")]
    #[case(2, Some(json!(i64::MAX)), false, 2, "decimal", "9223372036854775807.")]
    #[case(1, Some(json!(3999)), false, 1, "upper-roman", "MMMCMXCIX.")]
    #[case(2, Some(json!(3999)), false, 2, "lower-roman", "4000.")]
    #[case(1, Some(json!(2_000_000_000)), false, 1, "upper-roman", "2000000000.")]
    fn formats_markers(
        #[case] index: usize,
        #[case] start: Option<Value>,
        #[case] reversed: bool,
        #[case] total: i64,
        #[case] style: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(numbering(start, reversed, total, style).marker(index), expected);
    }

    #[test]
    fn reversed_without_start_counts_down_from_total() {
        let n = numbering(None, true, 4, "decimal");
        let markers: Vec<_> = (1..=4).map(|i| n.marker(i)).collect();
        assert_eq!(markers, vec!["4.", "3.", "2.", "1."]);
    }

    #[test]
    fn reversed_past_zero_shows_plain_numbers() {
        let n = numbering(Some(json!(1)), true, 3, "decimal");
        assert_eq!(n.marker(3), "-1.");

        let roman = numbering(Some(json!(1)), true, 3, "upper-roman");
        assert_eq!(roman.marker(2), "0.");
        assert_eq!(roman.marker(3), "-1.");

        let padded = numbering(Some(json!(1)), true, 3, "decimal-leading-zero");
        assert_eq!(padded.marker(2), "0.");
    }

    #[rstest]
    #[case(Some(json!(0)))]
    #[case(Some(json!(-2)))]
    #[case(Some(json!("abc")))]
    #[case(Some(json!("")))]
    #[case(None)]
    fn invalid_start_falls_back(#[case] start: Option<Value>) {
        assert_eq!(numbering(start.clone(), false, 5, "decimal").start, 1);
        assert_eq!(numbering(start, true, 5, "decimal").start, 5);
    }

    #[test]
    fn value_at_saturates_instead_of_overflowing() {
        let forward = numbering(Some(json!(i64::MAX)), false, 3, "decimal");
        assert_eq!(forward.value_at(3), i64::MAX);
        assert_eq!(forward.value_at(usize::MAX), i64::MAX);

        let reversed = ListNumbering {
            start: i64::MIN + 1,
            reversed: true,
            style: NumberingStyle::Decimal,
        };
        assert_eq!(reversed.value_at(3), i64::MIN);
    }

    #[test]
    fn numeric_string_start_is_honoured() {
        assert_eq!(numbering(Some(json!("7")), false, 1, "decimal").marker(2), "8.");
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn non_positive_total_counts_as_one(#[case] total: i64) {
        assert_eq!(numbering(None, true, total, "decimal").start, 1);
    }

    #[test]
    fn style_names_roundtrip_through_display() {
        for style in [
            NumberingStyle::Decimal,
            NumberingStyle::DecimalLeadingZero,
            NumberingStyle::UpperAlpha,
            NumberingStyle::LowerAlpha,
            NumberingStyle::UpperRoman,
            NumberingStyle::LowerRoman,
        ] {
            assert_eq!(style.to_string().parse::<NumberingStyle>(), Ok(style));
        }
    }
}
