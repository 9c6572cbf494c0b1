use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemberError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Member does not exist")]
    NotExistMember,
}
