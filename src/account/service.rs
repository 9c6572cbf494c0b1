//! Account domain service
//!
//! Applies the money-movement business rules to freshly loaded accounts.
//! Each operation is one database transaction: the balance mutation and the
//! history insert commit together or not at all. Callers are expected to
//! hold the account's registry lock for the duration of the call (see
//! `ConcurrencyFacade`); this service does not lock by itself.

use std::sync::Arc;
use tracing::debug;

use super::db::Database;
use super::error::AccountError;
use super::models::{AccountNumber, HistoryType};
use super::repository::AccountRepository;
use crate::money::Money;

pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Credit `amount` to the account and append a DEPOSIT history row.
    pub async fn deposit(
        &self,
        number: &AccountNumber,
        amount: Money,
    ) -> Result<(), AccountError> {
        let mut tx = self.db.pool().begin().await?;

        let account = AccountRepository::get_by_account_number(&mut *tx, number).await?;
        let new_balance = account.balance.add(amount)?;

        AccountRepository::save(&mut *tx, &account, new_balance).await?;
        AccountRepository::insert_history(
            &mut *tx,
            HistoryType::Deposit,
            amount,
            None,
            Some(number),
        )
        .await?;

        tx.commit().await?;

        debug!(account = %number, amount = %amount, balance = %new_balance, "deposit committed");
        Ok(())
    }

    /// Debit `amount` from the account and append a WITHDRAW history row.
    ///
    /// `InsufficientFunds` propagates before anything is written; the
    /// transaction is dropped unfinished and rolls back.
    pub async fn withdraw(
        &self,
        number: &AccountNumber,
        amount: Money,
    ) -> Result<(), AccountError> {
        let mut tx = self.db.pool().begin().await?;

        let account = AccountRepository::get_by_account_number(&mut *tx, number).await?;
        let new_balance = account.balance.subtract(amount)?;

        AccountRepository::save(&mut *tx, &account, new_balance).await?;
        AccountRepository::insert_history(
            &mut *tx,
            HistoryType::Withdraw,
            amount,
            Some(number),
            None,
        )
        .await?;

        tx.commit().await?;

        debug!(account = %number, amount = %amount, balance = %new_balance, "withdraw committed");
        Ok(())
    }

    /// Atomically debit `from` and credit `to`, recording one TRANSFER
    /// history row referencing both accounts.
    pub async fn transfer(
        &self,
        from: &AccountNumber,
        to: &AccountNumber,
        amount: Money,
    ) -> Result<(), AccountError> {
        // Re-validated here even though the facade checks first: internal
        // callers must not be able to bypass the rule.
        if from == to {
            return Err(AccountError::SameAccountTransfer);
        }

        let mut tx = self.db.pool().begin().await?;

        let from_account = AccountRepository::get_by_account_number(&mut *tx, from).await?;
        let to_account = AccountRepository::get_by_account_number(&mut *tx, to).await?;

        let from_balance = from_account.balance.subtract(amount)?;
        let to_balance = to_account.balance.add(amount)?;

        AccountRepository::save(&mut *tx, &from_account, from_balance).await?;
        AccountRepository::save(&mut *tx, &to_account, to_balance).await?;
        AccountRepository::insert_history(
            &mut *tx,
            HistoryType::Transfer,
            amount,
            Some(from),
            Some(to),
        )
        .await?;

        tx.commit().await?;

        debug!(
            from = %from,
            to = %to,
            amount = %amount,
            "transfer committed"
        );
        Ok(())
    }
}
