//! Friendship id lists.

use serde::{Deserialize, Serialize};

/// A page of user ids with cursor fields, as returned for pending friendship
/// requests. Returned as-is; not bound to a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdList {
    pub ids: Vec<u64>,
    pub next_cursor: i64,
    pub previous_cursor: i64,
}

impl IdList {
    /// Whether further pages follow this one.
    pub fn has_next(&self) -> bool {
        self.next_cursor != 0
    }
}
