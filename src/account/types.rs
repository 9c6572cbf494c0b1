//! Application-level commands and results for the account use cases

use super::models::{AccountHistory, AccountNumber};
use crate::money::Money;

/// Transfer request as seen by the use-case layer: destination and amount.
/// The source account comes from the request path.
#[derive(Debug, Clone)]
pub struct TransferCommand {
    pub to_account_number: AccountNumber,
    pub amount: Money,
}

/// Balance plus full movement history of one account.
#[derive(Debug)]
pub struct HistorySummary {
    pub balance: Money,
    pub entries: Vec<AccountHistory>,
}

/// A friend's account eligible as a transfer destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub email: String,
    pub account_number: AccountNumber,
}
