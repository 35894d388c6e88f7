use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cascade::Fields;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to parse page: {source}")]
    PageParseError { source: serde_json::Error },
}

/// One block instance in an authored page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    pub name: String,
    #[serde(default)]
    pub attrs: Fields,
    #[serde(default, alias = "innerBlocks")]
    pub inner_blocks: Vec<BlockNode>,
    /// Host-rendered inner content placed before the children's markup.
    #[serde(default, alias = "innerHTML", skip_serializing_if = "Option::is_none")]
    pub inner_html: Option<String>,
}

impl BlockNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, key: &str, value: serde_json::Value) -> Self {
        self.attrs.insert(key.to_string(), value);
        self
    }

    pub fn child(mut self, child: BlockNode) -> Self {
        self.inner_blocks.push(child);
        self
    }

    pub fn inner_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = Some(html.into());
        self
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.inner_blocks.iter().any(|b| b.name == name)
    }
}

/// A page: the ordered top-level blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    pub blocks: Vec<BlockNode>,
}

impl Page {
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        serde_json::from_str(json).map_err(|source| RenderError::PageParseError { source })
    }

    pub fn block_count(&self) -> usize {
        fn count(nodes: &[BlockNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.inner_blocks)).sum()
        }
        count(&self.blocks)
    }
}
