//! Core identifier types used throughout the system
//!
//! Ownership checks compare these typed ids by value; raw `i64`s never
//! cross a module boundary.

use serde::{Deserialize, Serialize};

/// Member ID - surrogate key of a member, immutable after assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub i64);

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Account ID - surrogate key of an account, distinct from the
/// human-facing account number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(MemberId(7), MemberId(7));
        assert_ne!(MemberId(7), MemberId(8));
        assert_eq!(AccountId(1), AccountId(1));
    }
}
