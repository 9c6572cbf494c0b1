//! Friend lookup service

use std::sync::Arc;
use sqlx::Row;

use super::models::Friend;
use crate::account::Database;
use crate::core_types::MemberId;

pub struct FriendService {
    db: Arc<Database>,
}

impl FriendService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All friends of the given member.
    pub async fn find_friends(&self, member_id: MemberId) -> Result<Vec<Friend>, sqlx::Error> {
        let rows = sqlx::query(
            r#"SELECT to_member_id FROM friends WHERE from_member_id = $1 ORDER BY to_member_id"#,
        )
        .bind(member_id.0)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Friend {
                to_member_id: MemberId(r.get("to_member_id")),
            })
            .collect())
    }
}
