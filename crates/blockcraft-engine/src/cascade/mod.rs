//! Attribute cascade: own configuration, then ancestor context, then default.
//!
//! "Empty" means absent, `null` or the empty string. `false` and `0` are real
//! values and stop the cascade, so a block switched off with `false` is never
//! switched back on by an ancestor or default of `true`.

pub mod context;

pub use context::{AncestorContext, ContextFrame};

use serde_json::Value;

/// A block's configuration record.
pub type Fields = serde_json::Map<String, Value>;

pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// First non-empty of `own[key]`, each ancestor record's `key` (nearest
/// first), then `default`.
pub fn resolve(key: &str, own: &Fields, ancestors: &[&Fields], default: Value) -> Value {
    std::iter::once(own.get(key))
        .chain(ancestors.iter().map(|record| record.get(key)))
        .find(|candidate| !is_empty(*candidate))
        .flatten()
        .cloned()
        .unwrap_or(default)
}

/// Reads fields for one block: its own record plus the context above it.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    own: &'a Fields,
    context: &'a AncestorContext<'a>,
}

impl<'a> Lookup<'a> {
    pub fn new(own: &'a Fields, context: &'a AncestorContext<'a>) -> Self {
        Self { own, context }
    }

    /// Starts a cascade with the block's own `key`.
    pub fn field(&self, key: &str) -> FieldCascade<'a> {
        FieldCascade {
            own: self.own.get(key),
            ancestors: Vec::new(),
            context: self.context,
            ancestor_first: false,
        }
    }

    /// The block's own value only, skipping empties.
    pub fn own(&self, key: &str) -> Option<&'a Value> {
        self.own.get(key).filter(|v| !is_empty(Some(*v)))
    }

    pub fn context(&self) -> &'a AncestorContext<'a> {
        self.context
    }
}

/// One field's candidate chain, evaluated left to right.
#[derive(Debug, Clone)]
pub struct FieldCascade<'a> {
    own: Option<&'a Value>,
    ancestors: Vec<Option<&'a Value>>,
    context: &'a AncestorContext<'a>,
    ancestor_first: bool,
}

impl<'a> FieldCascade<'a> {
    /// Falls back to `key` on the nearest ancestor named `block`.
    pub fn ancestor(mut self, block: &str, key: &str) -> Self {
        self.ancestors.push(self.context.get(block, key));
        self
    }

    /// Falls back to `key` on whichever ancestor is nearest.
    pub fn nearest(mut self, key: &str) -> Self {
        self.ancestors.push(self.context.nearest(key));
        self
    }

    /// Lets ancestor values win over the block's own value for this field.
    pub fn ancestor_first(mut self) -> Self {
        self.ancestor_first = true;
        self
    }

    fn candidates(&self) -> impl Iterator<Item = Option<&'a Value>> + '_ {
        let (before, after) = if self.ancestor_first {
            (None, Some(self.own))
        } else {
            (Some(self.own), None)
        };
        before
            .into_iter()
            .chain(self.ancestors.iter().copied())
            .chain(after)
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.candidates().find(|c| !is_empty(*c)).flatten()
    }

    pub fn value_or(&self, default: Value) -> Value {
        self.value().cloned().unwrap_or(default)
    }

    /// String form of the winning value. Numbers are stringified; other
    /// types are skipped as if empty.
    pub fn string(&self) -> Option<String> {
        self.value().and_then(value_to_string)
    }

    pub fn string_or(&self, default: &str) -> String {
        self.string().unwrap_or_else(|| default.to_string())
    }

    /// Booleans, plus the string forms `"true"`/`"false"`.
    pub fn bool_or(&self, default: bool) -> bool {
        match self.value() {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) if s == "true" => true,
            Some(Value::String(s)) if s == "false" => false,
            _ => default,
        }
    }

    pub fn i64(&self) -> Option<i64> {
        self.value().and_then(value_to_i64)
    }

    pub fn i64_or(&self, default: i64) -> i64 {
        self.i64().unwrap_or(default)
    }

    pub fn f64_or(&self, default: f64) -> f64 {
        self.value().and_then(value_to_f64).unwrap_or(default)
    }
}

pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integers, integral floats and numeric strings.
pub fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
