//! Canonical ordering for the unordered user pair of a relationship.
//!
//! Relationships are logically unordered. Rows are stored canonicalized
//! (smaller id first) so a plain unique index enforces
//! one-relationship-per-pair and a CHECK constraint rules out self-pairs.

use crate::error::CoreError;
use crate::types::DbId;

/// Order a pair of member ids so the smaller id comes first.
pub fn canonical_pair(a: DbId, b: DbId) -> Result<(DbId, DbId), CoreError> {
    if a == b {
        return Err(CoreError::Validation(
            "Cannot create a relationship with yourself".to_string(),
        ));
    }
    Ok(if a < b { (a, b) } else { (b, a) })
}

/// The member of `(user1_id, user2_id)` that is not `user_id`, or `None`
/// when `user_id` is not a member at all.
pub fn other_member(user1_id: DbId, user2_id: DbId, user_id: DbId) -> Option<DbId> {
    if user_id == user1_id {
        Some(user2_id)
    } else if user_id == user2_id {
        Some(user1_id)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_smaller_id_first() {
        assert_eq!(canonical_pair(2, 7).unwrap(), (2, 7));
        assert_eq!(canonical_pair(7, 2).unwrap(), (2, 7));
    }

    #[test]
    fn rejects_self_pair() {
        assert!(canonical_pair(3, 3).is_err());
    }

    #[test]
    fn other_member_resolves_both_sides() {
        assert_eq!(other_member(1, 2, 1), Some(2));
        assert_eq!(other_member(1, 2, 2), Some(1));
        assert_eq!(other_member(1, 2, 9), None);
    }
}
