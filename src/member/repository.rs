//! Repository layer for member lookups

use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, Row};

use super::models::Member;
use crate::core_types::MemberId;

pub struct MemberRepository;

impl MemberRepository {
    /// Get member by email (the authenticated principal).
    pub async fn get_by_email<'e>(
        exec: impl PgExecutor<'e>,
        email: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let row = sqlx::query(
            r#"SELECT id, name, email, created_at FROM members WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(exec)
        .await?;

        Ok(row.map(row_to_member))
    }

    /// Get all members with the given ids.
    pub async fn find_all_by_id<'e>(
        exec: impl PgExecutor<'e>,
        ids: &[MemberId],
    ) -> Result<Vec<Member>, sqlx::Error> {
        let raw: Vec<i64> = ids.iter().map(|m| m.0).collect();
        let rows = sqlx::query(
            r#"SELECT id, name, email, created_at FROM members WHERE id = ANY($1)"#,
        )
        .bind(raw)
        .fetch_all(exec)
        .await?;

        Ok(rows.into_iter().map(row_to_member).collect())
    }
}

fn row_to_member(r: PgRow) -> Member {
    Member {
        id: MemberId(r.get("id")),
        name: r.get("name"),
        email: r.get("email"),
        created_at: r.get("created_at"),
    }
}
