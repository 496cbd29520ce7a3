use serde::{Deserialize, Serialize};

/// Prefix carried by engine-synthesized (never persisted) items.
pub const VIRTUAL_PREFIX: &str = "virtual:";

/// Identifier of a financial item, as issued by the persistence layer.
///
/// Synthesized virtual expenses reuse the same type with a `virtual:` prefix
/// so the engine treats them like any other item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build an id for a synthesized item, e.g. `virtual:education:child0:primary`.
    pub fn synthetic(parts: &[&str]) -> Self {
        let mut id = String::from(VIRTUAL_PREFIX);
        id.push_str(&parts.join(":"));
        Self(id)
    }

    pub fn is_virtual(&self) -> bool {
        self.0.starts_with(VIRTUAL_PREFIX)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
