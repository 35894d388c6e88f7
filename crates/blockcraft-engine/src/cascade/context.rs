use serde_json::Value;

use super::{Fields, is_empty};

/// Values one ancestor block exposes to its descendants.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextFrame {
    pub block: String,
    pub fields: Fields,
}

impl ContextFrame {
    pub fn new(block: impl Into<String>, fields: Fields) -> Self {
        Self {
            block: block.into(),
            fields,
        }
    }
}

/// Downward-only chain of ancestor frames for one render traversal.
///
/// Each level borrows its parent, so a descendant can read everything above
/// it but has no way to change what an ancestor already exposed. Dropping a
/// child context at the end of a subtree discards its frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct AncestorContext<'p> {
    frame: Option<&'p ContextFrame>,
    parent: Option<&'p AncestorContext<'p>>,
}

impl<'p> AncestorContext<'p> {
    /// Context for top-level blocks: no ancestors.
    pub fn root() -> Self {
        Self::default()
    }

    /// Pushes `frame` as the nearest ancestor for the subtree below.
    pub fn child<'c>(&'c self, frame: &'c ContextFrame) -> AncestorContext<'c> {
        AncestorContext {
            frame: Some(frame),
            parent: Some(self),
        }
    }

    /// Frames ordered nearest to farthest.
    pub fn frames(&self) -> impl Iterator<Item = &'p ContextFrame> + '_ {
        let mut cursor = Some(self);
        std::iter::from_fn(move || {
            while let Some(ctx) = cursor {
                cursor = ctx.parent;
                if let Some(frame) = ctx.frame {
                    return Some(frame);
                }
            }
            None
        })
    }

    /// Value of `field` from the nearest ancestor named `block`.
    ///
    /// Empty values count as "not provided" so a farther ancestor of the same
    /// name may still supply one.
    pub fn get(&self, block: &str, field: &str) -> Option<&'p Value> {
        self.frames()
            .filter(|frame| frame.block == block)
            .filter_map(|frame| frame.fields.get(field))
            .find(|value| !is_empty(Some(*value)))
    }

    /// Value of `field` from whichever ancestor is nearest, regardless of name.
    pub fn nearest(&self, field: &str) -> Option<&'p Value> {
        self.frames()
            .filter_map(|frame| frame.fields.get(field))
            .find(|value| !is_empty(Some(*value)))
    }

    /// Whether some ancestor named `block` exists.
    pub fn has_ancestor(&self, block: &str) -> bool {
        self.frames().any(|frame| frame.block == block)
    }

    pub fn depth(&self) -> usize {
        self.frames().count()
    }
}
