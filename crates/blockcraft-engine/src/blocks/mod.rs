//! Built-in block types.

pub mod accordion;
pub mod address;
pub mod counter;
pub mod icon;
pub mod list;
pub mod section;
pub mod tabs;

pub use accordion::{AccordionBlock, AccordionDetailsBlock, AccordionItemBlock};
pub use address::AddressBlock;
pub use counter::{CounterBlock, CountersBlock};
pub use icon::{IconBlock, IconListBlock};
pub use list::{ListBlock, ListItemBlock};
pub use section::SectionBlock;
pub use tabs::{TabBlock, TabsBlock};

use serde_json::Value;

use crate::cascade::Fields;
use crate::render::BlockRegistry;

pub fn register_defaults(registry: &mut BlockRegistry) {
    registry.register(SectionBlock);
    registry.register(ListBlock);
    registry.register(ListItemBlock);
    registry.register(IconListBlock);
    registry.register(IconBlock);
    registry.register(CountersBlock);
    registry.register(CounterBlock);
    registry.register(AccordionBlock);
    registry.register(AccordionItemBlock);
    registry.register(AccordionDetailsBlock);
    registry.register(TabsBlock);
    registry.register(TabBlock);
    registry.register(AddressBlock);
}

/// Builds a context record, leaving out unset entries so they fall through
/// to farther ancestors.
pub(crate) fn context_fields<'a>(
    entries: impl IntoIterator<Item = (&'a str, Option<Value>)>,
) -> Fields {
    entries
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
        .collect()
}
