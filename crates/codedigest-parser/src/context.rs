use serde::{Deserialize, Serialize};
use tree_sitter::{Query, Tree};

/// Caller-supplied options threaded through every strategy call.
///
/// The engine does not interpret it; it only travels with the request so callers
/// can attach settings without changing the call signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParseConfig(serde_json::Value);

impl ParseConfig {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Read-only view of one file's parse, handed to strategies.
pub struct ParseContext<'a> {
    pub raw_text: &'a str,
    pub lines: &'a [&'a str],
    pub tree: &'a Tree,
    pub query: &'a Query,
    pub config: &'a ParseConfig,
}
