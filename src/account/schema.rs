//! Schema bootstrap for the banking tables
//!
//! The `CHECK (balance >= 0)` constraint is the storage-level backstop for
//! the balance invariant; the domain service never relies on it as the
//! primary guard.

use sqlx::PgPool;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS members (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS friends (
        id BIGSERIAL PRIMARY KEY,
        from_member_id BIGINT NOT NULL REFERENCES members(id),
        to_member_id BIGINT NOT NULL REFERENCES members(id),
        UNIQUE (from_member_id, to_member_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id BIGSERIAL PRIMARY KEY,
        member_id BIGINT NOT NULL REFERENCES members(id),
        account_number TEXT NOT NULL UNIQUE,
        balance BIGINT NOT NULL DEFAULT 0 CHECK (balance >= 0),
        version BIGINT NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS account_histories (
        id BIGSERIAL PRIMARY KEY,
        history_type SMALLINT NOT NULL,
        amount BIGINT NOT NULL CHECK (amount >= 0),
        from_account_number TEXT,
        to_account_number TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_account_histories_from
        ON account_histories (from_account_number)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_account_histories_to
        ON account_histories (to_account_number)
    "#,
];

/// Create the banking tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in DDL {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("banking schema ensured");
    Ok(())
}
