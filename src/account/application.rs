//! Account application service
//!
//! Request-level use cases: resolve the principal, check ownership, hand
//! money movements to the concurrency facade, then fire best-effort alarms.
//! Read-only queries (history, targets) take no registry lock; the store's
//! read consistency is enough for them.

use std::sync::Arc;
use tracing::warn;

use super::db::Database;
use super::error::AccountError;
use super::facade::ConcurrencyFacade;
use super::models::{Account, AccountNumber};
use super::repository::AccountRepository;
use super::types::{HistorySummary, Target, TransferCommand};
use crate::alarm::{AlarmMessage, Notifier, TaskStatus, TaskType};
use crate::core_types::MemberId;
use crate::member::{Member, MemberError, MemberService};
use crate::money::Money;
use crate::social::FriendService;

impl From<MemberError> for AccountError {
    fn from(e: MemberError) -> Self {
        match e {
            MemberError::NotExistMember => AccountError::NotExistMember,
            MemberError::Database(e) => AccountError::Database(e),
        }
    }
}

pub struct AccountApplicationService {
    db: Arc<Database>,
    members: MemberService,
    friends: FriendService,
    facade: Arc<ConcurrencyFacade>,
    notifier: Arc<dyn Notifier>,
}

impl AccountApplicationService {
    pub fn new(
        db: Arc<Database>,
        members: MemberService,
        friends: FriendService,
        facade: Arc<ConcurrencyFacade>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            db,
            members,
            friends,
            facade,
            notifier,
        }
    }

    /// Balance and full movement history, owner only.
    pub async fn get_history(
        &self,
        principal: &str,
        number: &AccountNumber,
    ) -> Result<HistorySummary, AccountError> {
        let account = self.load_account(number).await?;
        self.validate_member(principal, &account).await?;

        let entries =
            AccountRepository::find_histories_by_account_number(self.db.pool(), number).await?;
        Ok(HistorySummary {
            balance: account.balance,
            entries,
        })
    }

    pub async fn deposit(
        &self,
        principal: &str,
        number: &AccountNumber,
        amount: Money,
    ) -> Result<(), AccountError> {
        let account = self.load_account(number).await?;
        self.validate_member(principal, &account).await?;

        self.facade.deposit_with_lock(number, amount).await?;

        self.notify(
            account.member_id,
            AlarmMessage::new(TaskStatus::Success, TaskType::Deposit),
        )
        .await;
        Ok(())
    }

    pub async fn withdraw(
        &self,
        principal: &str,
        number: &AccountNumber,
        amount: Money,
    ) -> Result<(), AccountError> {
        let account = self.load_account(number).await?;
        self.validate_member(principal, &account).await?;

        self.facade.withdraw_with_lock(number, amount).await?;

        self.notify(
            account.member_id,
            AlarmMessage::new(TaskStatus::Success, TaskType::Withdraw),
        )
        .await;
        Ok(())
    }

    /// Transfer from the caller's account to the command's destination.
    /// Both affected members are notified after commit: the sender about
    /// the transfer, the receiver about the incoming deposit.
    pub async fn transfer(
        &self,
        principal: &str,
        number: &AccountNumber,
        command: TransferCommand,
    ) -> Result<(), AccountError> {
        let from_account = self.load_account(number).await?;
        let to_account = self.load_account(&command.to_account_number).await?;
        self.validate_member(principal, &from_account).await?;

        self.facade
            .transfer_with_lock(number, &command.to_account_number, command.amount)
            .await?;

        self.notify(
            from_account.member_id,
            AlarmMessage::new(TaskStatus::Success, TaskType::Transfer),
        )
        .await;
        self.notify(
            to_account.member_id,
            AlarmMessage::new(TaskStatus::Success, TaskType::Deposit),
        )
        .await;
        Ok(())
    }

    /// Transfer destinations for the caller: every friend's account, with
    /// name and email joined in from the member directory.
    pub async fn get_targets(
        &self,
        principal: &str,
        number: &AccountNumber,
    ) -> Result<Vec<Target>, AccountError> {
        let account = self.load_account(number).await?;
        let member = self.validate_member(principal, &account).await?;

        let friend_ids: Vec<MemberId> = self
            .friends
            .find_friends(member.id)
            .await?
            .into_iter()
            .map(|f| f.to_member_id)
            .collect();

        let friend_members = self.members.find_all_by_id(&friend_ids).await?;
        let friend_accounts =
            AccountRepository::find_by_member_ids(self.db.pool(), &friend_ids).await?;

        friend_accounts
            .into_iter()
            .map(|friend_account| {
                // a friend account whose member record is missing is a
                // data-integrity bug, not a user error
                let friend = friend_members
                    .iter()
                    .find(|m| m.id == friend_account.member_id)
                    .ok_or_else(|| {
                        AccountError::DataIntegrity(format!(
                            "no member record for friend account {}",
                            friend_account.account_number
                        ))
                    })?;
                Ok(Target {
                    name: friend.name.clone(),
                    email: friend.email.clone(),
                    account_number: friend_account.account_number,
                })
            })
            .collect()
    }

    async fn load_account(&self, number: &AccountNumber) -> Result<Account, AccountError> {
        AccountRepository::get_by_account_number(self.db.pool(), number).await
    }

    /// The caller owns the account iff the principal's member id equals the
    /// account's owning member id. Typed ids, compared by value.
    async fn validate_member(
        &self,
        principal: &str,
        account: &Account,
    ) -> Result<Member, AccountError> {
        let member = self.members.find_by_email(principal).await?;
        if member.id != account.member_id {
            return Err(AccountError::InvalidMember);
        }
        Ok(member)
    }

    async fn notify(&self, member_id: MemberId, message: AlarmMessage) {
        if let Err(e) = self.notifier.notify(member_id, message).await {
            warn!(member_id = %member_id, error = %e, "notification failed (movement already committed)");
        }
    }
}
