use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque entity identifier. Equality is exact string match.
///
/// Ordering puts pure-digit ids first, compared numerically (shorter is
/// smaller, then digit by digit), so SCTIDs sort the way they read. Other ids
/// follow in byte order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    fn sort_key(&self) -> (bool, usize, &str) {
        let numeric = !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit());
        if numeric {
            (false, self.0.len(), &self.0)
        } else {
            (true, 0, &self.0)
        }
    }
}

impl Ord for EntityId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for EntityId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
