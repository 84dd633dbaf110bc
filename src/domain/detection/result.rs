use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque result of a remote workflow run.
///
/// The hosted workflow's response schema is not contractually fixed (the
/// observed shapes ranged from a bare object to `{"outputs": [...]}`), so the
/// payload is carried verbatim and handed back to the caller untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowResult(Value);

impl WorkflowResult {
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    /// Number of top-level results, for success logging only.
    ///
    /// A top-level array counts its elements; anything else counts as a
    /// single result.
    pub fn result_count(&self) -> usize {
        match &self.0 {
            Value::Array(items) => items.len(),
            _ => 1,
        }
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for WorkflowResult {
    fn from(payload: Value) -> Self {
        Self::new(payload)
    }
}
