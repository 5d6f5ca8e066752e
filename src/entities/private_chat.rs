//! PrivateChat entity - Conversazione tra due utenti

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row per unordered pair of users, stored with `user1_id < user2_id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PrivateChat {
    pub id: i64,
    pub user1_id: i64,
    pub user2_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrivateChat {
    /// Orders a pair of user ids the way the table stores them.
    pub fn normalize_pair(a: i64, b: i64) -> (i64, i64) {
        if a <= b { (a, b) } else { (b, a) }
    }

    /// The participant that is not `user_id`, if `user_id` belongs to the chat.
    pub fn other_member(&self, user_id: i64) -> Option<i64> {
        if self.user1_id == user_id {
            Some(self.user2_id)
        } else if self.user2_id == user_id {
            Some(self.user1_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(user1_id: i64, user2_id: i64) -> PrivateChat {
        let now = Utc::now();
        PrivateChat {
            id: 1,
            user1_id,
            user2_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_normalize_pair_is_order_independent() {
        assert_eq!(PrivateChat::normalize_pair(7, 3), (3, 7));
        assert_eq!(PrivateChat::normalize_pair(3, 7), (3, 7));
    }

    #[test]
    fn test_other_member() {
        let c = chat(2, 5);
        assert_eq!(c.other_member(2), Some(5));
        assert_eq!(c.other_member(5), Some(2));
        assert_eq!(c.other_member(9), None);
    }
}
