//! banking-api - Concurrency-Safe Banking Account API
//!
//! Members hold accounts, deposit/withdraw funds, transfer between accounts,
//! and view movement history and transfer targets. The core guarantee: two
//! operations touching the same account never interleave unsafely - a
//! per-account lock registry linearizes movements, a deterministic lock
//! order makes two-account transfers deadlock-free, and every committed
//! movement writes its immutable history row in the same transaction as the
//! balance change.
//!
//! # Modules
//!
//! - [`core_types`] - Typed identifiers (MemberId, AccountId)
//! - [`money`] - Non-negative monetary amount with strict parse/format
//! - [`account`] - Entities, repository, domain service, lock registry,
//!   concurrency facade and the application service
//! - [`member`] - Member directory collaborator
//! - [`social`] - Friend-relationship collaborator
//! - [`alarm`] - Best-effort notification seam
//! - [`gateway`] - axum HTTP surface
//! - [`config`] / [`logging`] - deployment configuration and tracing setup

pub mod core_types;

pub mod money;

pub mod account;
pub mod alarm;
pub mod member;
pub mod social;

pub mod config;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use account::{
    Account, AccountApplicationService, AccountError, AccountHistory, AccountNumber,
    AccountRepository, AccountService, ConcurrencyFacade, Database, HistorySummary, HistoryType,
    LockRegistry, Target, TransferCommand,
};
pub use alarm::{AlarmMessage, LogNotifier, Notifier, TaskStatus, TaskType};
pub use config::AppConfig;
pub use core_types::{AccountId, MemberId};
pub use member::{Member, MemberService};
pub use money::{Money, MoneyError};
pub use social::{Friend, FriendService};
