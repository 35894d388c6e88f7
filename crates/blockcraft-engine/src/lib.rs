pub mod attributes;
pub mod blocks;
pub mod cascade;
pub mod interactivity;
pub mod markup;
pub mod numbering;
pub mod render;
pub mod style;
pub mod uploads;

// Re-export key types for easier usage
pub use attributes::PresentationAttributes;
pub use cascade::{AncestorContext, ContextFrame, Fields, Lookup, resolve};
pub use interactivity::Interactivity;
pub use numbering::{ListNumbering, NumberingStyle};
pub use render::{
    Block, BlockInput, BlockNode, BlockRegistry, Page, Position, RenderError, RenderOptions,
    Renderer,
};
pub use style::{BuiltStyle, StyleDirective, StyleSheet, StyleValue};
pub use uploads::UploadPolicy;
