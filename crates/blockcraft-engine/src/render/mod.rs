//! Block registry and the depth-first renderer.
//!
//! For every node the renderer asks the block for the context it exposes,
//! renders the children under that context, then hands the children's markup
//! back to the block to compose its own fragment. An empty fragment means the
//! block suppressed itself and is left out of the parent.

pub mod node;

pub use node::{BlockNode, Page, RenderError};

use std::collections::HashMap;
use std::fmt;

use crate::cascade::{AncestorContext, ContextFrame, Fields, Lookup};
use crate::interactivity::Interactivity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix for generated class names and DOM ids.
    pub class_prefix: String,
    pub interactivity: Interactivity,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            class_prefix: "bk".to_string(),
            interactivity: Interactivity::default(),
        }
    }
}

impl RenderOptions {
    /// `<prefix>-<name>`, e.g. `bk-list-item`.
    pub fn class(&self, name: &str) -> String {
        format!("{}-{name}", self.class_prefix)
    }
}

/// Where a node sits among its siblings and in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position<'a> {
    /// 1-based index among siblings.
    pub index: usize,
    /// Number of siblings including this node.
    pub count: usize,
    /// 1-based indices from the page root down to this node.
    pub path: &'a [usize],
}

impl Position<'_> {
    pub fn dom_id(&self, prefix: &str) -> String {
        path_id(prefix, self.path)
    }

    pub fn parent_dom_id(&self, prefix: &str) -> Option<String> {
        let (_, parent) = self.path.split_last()?;
        (!parent.is_empty()).then(|| path_id(prefix, parent))
    }
}

fn path_id(prefix: &str, path: &[usize]) -> String {
    let mut id = prefix.to_string();
    for step in path {
        id.push('-');
        id.push_str(&step.to_string());
    }
    id
}

/// Everything a block sees while resolving and composing.
#[derive(Debug, Clone, Copy)]
pub struct BlockInput<'a> {
    pub node: &'a BlockNode,
    pub context: &'a AncestorContext<'a>,
    pub position: Position<'a>,
    /// Host inner HTML followed by the rendered children. Empty while
    /// [`Block::provides_context`] runs.
    pub inner_html: &'a str,
    pub options: &'a RenderOptions,
}

impl<'a> BlockInput<'a> {
    pub fn attrs(&self) -> &'a Fields {
        &self.node.attrs
    }

    pub fn children(&self) -> &'a [BlockNode] {
        &self.node.inner_blocks
    }

    pub fn lookup(&self) -> Lookup<'a> {
        Lookup::new(&self.node.attrs, self.context)
    }

    pub fn class(&self, name: &str) -> String {
        self.options.class(name)
    }

    /// Explicit `anchor` attribute, else an id derived from the tree path.
    pub fn dom_id(&self) -> String {
        self.lookup()
            .field("anchor")
            .string()
            .unwrap_or_else(|| self.position.dom_id(&self.options.class_prefix))
    }

    pub fn interactivity(&self) -> &'a Interactivity {
        &self.options.interactivity
    }
}

/// A block type: resolver plus composer.
pub trait Block: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fields exposed to descendants. Called before any child renders.
    fn provides_context(&self, _input: &BlockInput<'_>) -> Option<Fields> {
        None
    }

    /// Composes the block's HTML. Returning an empty string omits the block.
    fn render(&self, input: &BlockInput<'_>) -> String;
}

/// The set of known block types, built once at startup and handed to a
/// [`Renderer`].
#[derive(Default)]
pub struct BlockRegistry {
    blocks: HashMap<&'static str, Box<dyn Block>>,
}

impl fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("blocks", &self.names())
            .finish()
    }
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in block.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::blocks::register_defaults(&mut registry);
        registry
    }

    /// Adds a block type, returning any previous one with the same name.
    pub fn register(&mut self, block: impl Block + 'static) -> Option<Box<dyn Block>> {
        self.blocks.insert(block.name(), Box::new(block))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Block> {
        self.blocks.get(name).map(|b| b.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.blocks.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug)]
pub struct Renderer {
    registry: BlockRegistry,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(registry: BlockRegistry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render_page(&self, page: &Page) -> String {
        self.render_blocks(&page.blocks, &AncestorContext::root(), &[])
    }

    /// Renders a single node as if it were the only top-level block.
    pub fn render_node(&self, node: &BlockNode) -> String {
        self.render_blocks(std::slice::from_ref(node), &AncestorContext::root(), &[])
    }

    fn render_blocks(
        &self,
        nodes: &[BlockNode],
        context: &AncestorContext<'_>,
        parent_path: &[usize],
    ) -> String {
        let count = nodes.len();
        let mut out = String::new();
        for (i, node) in nodes.iter().enumerate() {
            let mut path = parent_path.to_vec();
            path.push(i + 1);
            let position = Position {
                index: i + 1,
                count,
                path: &path,
            };
            out.push_str(&self.render_at(node, context, position));
        }
        out
    }

    fn render_at(
        &self,
        node: &BlockNode,
        context: &AncestorContext<'_>,
        position: Position<'_>,
    ) -> String {
        let Some(block) = self.registry.get(&node.name) else {
            log::warn!("Unknown block type '{}', passing inner content through", node.name);
            let mut html = node.inner_html.clone().unwrap_or_default();
            html.push_str(&self.render_blocks(&node.inner_blocks, context, position.path));
            return html;
        };

        let probe = BlockInput {
            node,
            context,
            position,
            inner_html: "",
            options: &self.options,
        };
        let frame = block
            .provides_context(&probe)
            .map(|fields| ContextFrame::new(node.name.clone(), fields));

        let children = match &frame {
            Some(frame) => {
                let child_context = context.child(frame);
                self.render_blocks(&node.inner_blocks, &child_context, position.path)
            }
            None => self.render_blocks(&node.inner_blocks, context, position.path),
        };

        let mut inner = node.inner_html.clone().unwrap_or_default();
        inner.push_str(&children);

        let html = block.render(&BlockInput {
            inner_html: &inner,
            ..probe
        });
        if html.is_empty() {
            log::debug!("Block '{}' at {:?} rendered nothing", node.name, position.path);
        }
        html
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(BlockRegistry::with_defaults(), RenderOptions::default())
    }
}
