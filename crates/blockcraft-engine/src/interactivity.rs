//! Data attributes read by the client-side reactive runtime.
//!
//! The names follow the runtime's directive contract:
//! `data-<prefix>-interactive`, `data-<prefix>-context`,
//! `data-<prefix>-on--<event>`, `data-<prefix>-bind--<attribute>`,
//! `data-<prefix>-class--<class>` and `data-<prefix>-init`. Nothing here
//! implements the behaviour, it only has to be spelled correctly.

use serde::Serialize;

pub const DEFAULT_PREFIX: &str = "wp";
pub const DEFAULT_NAMESPACE: &str = "blockcraft";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interactivity {
    prefix: String,
    namespace: String,
}

impl Default for Interactivity {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_NAMESPACE)
    }
}

impl Interactivity {
    pub fn new(prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn name(&self, directive: &str) -> String {
        format!("data-{}-{directive}", self.prefix)
    }

    /// Marks the root of an interactive region.
    pub fn interactive(&self) -> (String, String) {
        (self.name("interactive"), self.namespace.clone())
    }

    /// Local state for the region, serialized as JSON.
    pub fn context<T: Serialize>(&self, state: &T) -> (String, String) {
        let json = serde_json::to_string(state).unwrap_or_else(|e| {
            log::warn!("Failed to serialize {} context: {e}", self.namespace);
            "{}".to_string()
        });
        (self.name("context"), json)
    }

    pub fn on(&self, event: &str, action: &str) -> (String, String) {
        (self.name(&format!("on--{event}")), action.to_string())
    }

    pub fn bind(&self, attribute: &str, expression: &str) -> (String, String) {
        (self.name(&format!("bind--{attribute}")), expression.to_string())
    }

    pub fn class_toggle(&self, class: &str, expression: &str) -> (String, String) {
        (self.name(&format!("class--{class}")), expression.to_string())
    }

    pub fn init(&self, callback: &str) -> (String, String) {
        (self.name("init"), callback.to_string())
    }
}
