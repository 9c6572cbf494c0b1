//! Concurrency facade for money movements
//!
//! The single entry point for anything that mutates a balance. Guarantees
//! at most one in-flight movement per account: acquire the registry lock(s),
//! run the domain service's transactional unit, release on every exit path.
//!
//! Lock scope covers load+mutate+persist only. Notification happens in the
//! application layer after the facade returns, so a slow or failing
//! notification can never hold up other operations on the account.

use std::sync::Arc;
use tracing::{debug, warn};

use super::error::AccountError;
use super::locks::LockRegistry;
use super::models::AccountNumber;
use super::service::AccountService;
use crate::money::Money;

pub struct ConcurrencyFacade {
    registry: LockRegistry,
    service: AccountService,
    /// Bound on `VersionConflict` retries. Conflicts only arise from
    /// writers outside this process (in-process writers serialize on the
    /// registry), so a couple of fresh reloads normally resolve them.
    max_retries: u32,
}

impl ConcurrencyFacade {
    pub fn new(registry: LockRegistry, service: AccountService, max_retries: u32) -> Self {
        Self {
            registry,
            service,
            max_retries,
        }
    }

    pub async fn deposit_with_lock(
        &self,
        number: &AccountNumber,
        amount: Money,
    ) -> Result<(), AccountError> {
        let _guard = self.registry.acquire(number).await?;

        let mut attempt = 0;
        loop {
            match self.service.deposit(number, amount).await {
                Err(AccountError::VersionConflict) if attempt < self.max_retries => {
                    attempt += 1;
                    debug!(account = %number, attempt, "version conflict on deposit, reloading");
                }
                result => return result,
            }
        }
    }

    pub async fn withdraw_with_lock(
        &self,
        number: &AccountNumber,
        amount: Money,
    ) -> Result<(), AccountError> {
        let _guard = self.registry.acquire(number).await?;

        let mut attempt = 0;
        loop {
            match self.service.withdraw(number, amount).await {
                Err(AccountError::VersionConflict) if attempt < self.max_retries => {
                    attempt += 1;
                    debug!(account = %number, attempt, "version conflict on withdraw, reloading");
                }
                result => return result,
            }
        }
    }

    /// Locks both accounts in the registry's deterministic order, then runs
    /// the transfer unit. Same-account transfers are rejected before any
    /// lock is touched - `acquire_pair` requires distinct numbers.
    pub async fn transfer_with_lock(
        &self,
        from: &AccountNumber,
        to: &AccountNumber,
        amount: Money,
    ) -> Result<(), AccountError> {
        if from == to {
            return Err(AccountError::SameAccountTransfer);
        }

        let (_from_guard, _to_guard) = self.registry.acquire_pair(from, to).await?;

        let mut attempt = 0;
        loop {
            match self.service.transfer(from, to, amount).await {
                Err(AccountError::VersionConflict) if attempt < self.max_retries => {
                    attempt += 1;
                    debug!(from = %from, to = %to, attempt, "version conflict on transfer, reloading");
                }
                Err(AccountError::VersionConflict) => {
                    warn!(from = %from, to = %to, "transfer retries exhausted on version conflict");
                    return Err(AccountError::VersionConflict);
                }
                result => return result,
            }
        }
    }
}
