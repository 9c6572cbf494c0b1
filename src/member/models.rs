//! Member data model

use chrono::{DateTime, Utc};

use crate::core_types::MemberId;

/// A registered member. Identity management itself lives outside this
/// service; members are looked up, never created here.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
