use serde_json::Value;

use crate::markup::Element;
use crate::render::{Block, BlockInput};
use crate::style::{StyleSheet, color_directive};

const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Postal address with an optional map link. Renders nothing when every
/// address field is empty.
pub struct AddressBlock;

impl AddressBlock {
    fn lines(input: &BlockInput<'_>) -> Vec<String> {
        let lookup = input.lookup();
        let get = |key: &str| lookup.field(key).string().map(|s| s.trim().to_string());
        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());

        let locality = non_empty(get("locality"));
        let region = non_empty(get("region"));
        let postal = non_empty(get("postalCode"));

        let mut city_line = locality.unwrap_or_default();
        if let Some(region) = region {
            if !city_line.is_empty() {
                city_line.push_str(", ");
            }
            city_line.push_str(&region);
        }
        if let Some(postal) = postal {
            if !city_line.is_empty() {
                city_line.push(' ');
            }
            city_line.push_str(&postal);
        }

        [
            non_empty(get("street")),
            non_empty(get("street2")),
            Some(city_line).filter(|s| !s.is_empty()),
            non_empty(get("country")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn map_url(lines: &[String]) -> String {
        format!("{MAP_SEARCH_URL}{}", urlencoding::encode(&lines.join(", ")))
    }
}

impl Block for AddressBlock {
    fn name(&self) -> &'static str {
        "address"
    }

    fn render(&self, input: &BlockInput<'_>) -> String {
        let lines = Self::lines(input);
        if lines.is_empty() {
            log::debug!("address block with no address fields");
            return String::new();
        }
        let lookup = input.lookup();

        let mut address = Element::new("address");
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                address = address.child(Element::new("br"));
            }
            address = address.text(line);
        }

        let map_link = lookup.field("showMapLink").bool_or(true).then(|| {
            Element::new("a")
                .with(|a| {
                    a.class(input.class("address__map"))
                        .attr("href", Self::map_url(&lines))
                        .attr("target", "_blank")
                        .attr("rel", "noopener noreferrer")
                })
                .text(&lookup.field("mapLabel").string_or("View on map"))
        });

        let mut sheet = StyleSheet::new();
        sheet.extend(color_directive(
            "textColor",
            lookup
                .field("textColor")
                .nearest("textColor")
                .value()
                .and_then(Value::as_str),
            "color",
            "text-color",
        ));

        Element::new("div")
            .with(|a| a.class(input.class("address")).style(sheet.build()))
            .child(address)
            .child_if(map_link)
            .render()
    }
}
