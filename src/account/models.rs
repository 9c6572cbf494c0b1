//! Data models for accounts and their movement history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core_types::{AccountId, MemberId};
use crate::money::Money;

// ============================================================================
// AccountNumber
// ============================================================================

/// Human-facing account identifier, unique per account.
///
/// Equality and ordering are by string value; the ordering doubles as the
/// total lock order for two-account operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

const ACCOUNT_NUMBER_MAX_LEN: usize = 32;

impl AccountNumber {
    /// Validate and wrap a raw account number string.
    ///
    /// Accepts digits and dashes, non-empty, bounded length.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err("account number must not be empty".to_string());
        }
        if raw.len() > ACCOUNT_NUMBER_MAX_LEN {
            return Err(format!(
                "account number too long: {} chars, max {}",
                raw.len(),
                ACCOUNT_NUMBER_MAX_LEN
            ));
        }
        if !raw.chars().all(|c| c.is_ascii_digit() || c == '-') {
            return Err(format!("invalid character in account number: {}", raw));
        }
        Ok(AccountNumber(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Account
// ============================================================================

/// Account entity.
///
/// `account_number` and `member_id` are immutable after creation; `balance`
/// is only mutated through the domain service while the account's registry
/// lock is held. `version` backs the optimistic save guard.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub member_id: MemberId,
    pub account_number: AccountNumber,
    pub balance: Money,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// AccountHistory
// ============================================================================

/// Movement type of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum HistoryType {
    Deposit = 1,
    Withdraw = 2,
    Transfer = 3,
}

impl HistoryType {
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            1 => Some(HistoryType::Deposit),
            2 => Some(HistoryType::Withdraw),
            3 => Some(HistoryType::Transfer),
            _ => None,
        }
    }
}

/// Immutable record of one completed money movement.
///
/// Written exactly once per committed movement, in the same transaction as
/// the balance change. A transfer is a single row with both account numbers
/// populated; pure deposits carry no source, pure withdrawals no destination.
#[derive(Debug, Clone)]
pub struct AccountHistory {
    pub id: i64,
    pub history_type: HistoryType,
    pub amount: Money,
    pub from_account_number: Option<AccountNumber>,
    pub to_account_number: Option<AccountNumber>,
    pub created_at: DateTime<Utc>,
}
