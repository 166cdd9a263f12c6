use serde_json::{Map, Value};

/// The trailing argument of every helper call.
///
/// `hash` carries the template author's named parameters
/// (`{{translate "key" count=2}}` gives `{"count": 2}`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvocationOptions {
    pub hash: Map<String, Value>,
}

impl InvocationOptions {
    /// Options with an empty hash.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the given named parameters.
    pub fn with_hash(hash: Map<String, Value>) -> Self {
        Self { hash }
    }

    /// A named parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.hash.get(name)
    }
}

impl From<Map<String, Value>> for InvocationOptions {
    fn from(hash: Map<String, Value>) -> Self {
        Self::with_hash(hash)
    }
}
