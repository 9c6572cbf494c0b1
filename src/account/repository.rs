//! Repository layer for account and history rows
//!
//! Methods take any `PgExecutor` so the same query runs against the pool
//! (plain reads) or inside an open transaction (the domain service's unit
//! of work).

use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, Row};

use super::error::AccountError;
use super::models::{Account, AccountHistory, AccountNumber, HistoryType};
use crate::core_types::{AccountId, MemberId};
use crate::money::Money;

pub struct AccountRepository;

impl AccountRepository {
    /// Load an account by its account number. Miss is `AccountNotFound`.
    pub async fn get_by_account_number<'e>(
        exec: impl PgExecutor<'e>,
        number: &AccountNumber,
    ) -> Result<Account, AccountError> {
        let row = sqlx::query(
            r#"SELECT id, member_id, account_number, balance, version, created_at
               FROM accounts WHERE account_number = $1"#,
        )
        .bind(number.as_str())
        .fetch_optional(exec)
        .await?;

        row.map(row_to_account)
            .transpose()?
            .ok_or_else(|| AccountError::AccountNotFound(number.to_string()))
    }

    /// Accounts owned by any of the given members (friend-account lookup).
    pub async fn find_by_member_ids<'e>(
        exec: impl PgExecutor<'e>,
        member_ids: &[MemberId],
    ) -> Result<Vec<Account>, AccountError> {
        let ids: Vec<i64> = member_ids.iter().map(|m| m.0).collect();
        let rows = sqlx::query(
            r#"SELECT id, member_id, account_number, balance, version, created_at
               FROM accounts WHERE member_id = ANY($1) ORDER BY id"#,
        )
        .bind(ids)
        .fetch_all(exec)
        .await?;

        rows.into_iter().map(row_to_account).collect()
    }

    /// History entries involving the account, newest first.
    ///
    /// Matches either side of the row so deposits (no source), withdrawals
    /// (no destination) and transfers all appear in the owner's listing.
    pub async fn find_histories_by_account_number<'e>(
        exec: impl PgExecutor<'e>,
        number: &AccountNumber,
    ) -> Result<Vec<AccountHistory>, AccountError> {
        let rows = sqlx::query(
            r#"SELECT id, history_type, amount, from_account_number, to_account_number, created_at
               FROM account_histories
               WHERE from_account_number = $1 OR to_account_number = $1
               ORDER BY created_at DESC, id DESC"#,
        )
        .bind(number.as_str())
        .fetch_all(exec)
        .await?;

        rows.into_iter().map(row_to_history).collect()
    }

    /// Count of history rows involving the account (test support for the
    /// no-history-on-failure property).
    pub async fn count_histories_by_account_number<'e>(
        exec: impl PgExecutor<'e>,
        number: &AccountNumber,
    ) -> Result<i64, AccountError> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM account_histories
               WHERE from_account_number = $1 OR to_account_number = $1"#,
        )
        .bind(number.as_str())
        .fetch_one(exec)
        .await?;
        Ok(count)
    }

    /// Persist a new balance, guarded by the version the account was loaded
    /// at. Zero rows affected means another writer got there first.
    pub async fn save<'e>(
        exec: impl PgExecutor<'e>,
        account: &Account,
        new_balance: Money,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"UPDATE accounts SET balance = $1, version = version + 1
               WHERE id = $2 AND version = $3"#,
        )
        .bind(new_balance.amount())
        .bind(account.id.0)
        .bind(account.version)
        .execute(exec)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AccountError::VersionConflict);
        }
        Ok(())
    }

    /// Append one immutable history row.
    pub async fn insert_history<'e>(
        exec: impl PgExecutor<'e>,
        history_type: HistoryType,
        amount: Money,
        from: Option<&AccountNumber>,
        to: Option<&AccountNumber>,
    ) -> Result<(), AccountError> {
        sqlx::query(
            r#"INSERT INTO account_histories
               (history_type, amount, from_account_number, to_account_number)
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(history_type as i16)
        .bind(amount.amount())
        .bind(from.map(AccountNumber::as_str))
        .bind(to.map(AccountNumber::as_str))
        .execute(exec)
        .await?;
        Ok(())
    }
}

fn row_to_account(r: PgRow) -> Result<Account, AccountError> {
    let number: String = r.get("account_number");
    let account_number = AccountNumber::new(number)
        .map_err(|e| AccountError::DataIntegrity(format!("bad stored account number: {}", e)))?;
    let balance: i64 = r.get("balance");
    let balance = Money::of(balance).map_err(|_| {
        AccountError::DataIntegrity(format!("negative balance for account {}", account_number))
    })?;

    Ok(Account {
        id: AccountId(r.get("id")),
        member_id: MemberId(r.get("member_id")),
        account_number,
        balance,
        version: r.get("version"),
        created_at: r.get("created_at"),
    })
}

fn row_to_history(r: PgRow) -> Result<AccountHistory, AccountError> {
    let type_raw: i16 = r.get("history_type");
    let history_type = HistoryType::from_i16(type_raw)
        .ok_or_else(|| AccountError::DataIntegrity(format!("unknown history type {}", type_raw)))?;
    let amount: i64 = r.get("amount");
    let amount = Money::of(amount)
        .map_err(|_| AccountError::DataIntegrity("negative history amount".to_string()))?;

    let parse_opt = |col: &str| -> Result<Option<AccountNumber>, AccountError> {
        r.get::<Option<String>, _>(col)
            .map(|s| {
                AccountNumber::new(s).map_err(|e| {
                    AccountError::DataIntegrity(format!("bad stored account number: {}", e))
                })
            })
            .transpose()
    };

    Ok(AccountHistory {
        id: r.get("id"),
        history_type,
        amount,
        from_account_number: parse_opt("from_account_number")?,
        to_account_number: parse_opt("to_account_number")?,
        created_at: r.get("created_at"),
    })
}
