//! Member lookup service

use std::sync::Arc;

use super::error::MemberError;
use super::models::Member;
use super::repository::MemberRepository;
use crate::account::Database;
use crate::core_types::MemberId;

pub struct MemberService {
    db: Arc<Database>,
}

impl MemberService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Resolve the authenticated principal to a member.
    pub async fn find_by_email(&self, email: &str) -> Result<Member, MemberError> {
        MemberRepository::get_by_email(self.db.pool(), email)
            .await?
            .ok_or(MemberError::NotExistMember)
    }

    pub async fn find_all_by_id(&self, ids: &[MemberId]) -> Result<Vec<Member>, MemberError> {
        Ok(MemberRepository::find_all_by_id(self.db.pool(), ids).await?)
    }
}
