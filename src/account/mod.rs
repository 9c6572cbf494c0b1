//! Account domain: money movements and their consistency machinery
//!
//! Layering, outside in:
//! - [`application`] - request-level use cases (ownership check, targets,
//!   notification)
//! - [`facade`] - per-account locking around every movement
//! - [`service`] - transactional deposit/withdraw/transfer rules
//! - [`repository`] / [`db`] / [`schema`] - PostgreSQL persistence

pub mod application;
pub mod db;
pub mod error;
pub mod facade;
pub mod locks;
pub mod models;
pub mod repository;
pub mod schema;
pub mod service;
pub mod types;

#[cfg(test)]
mod integration_tests;

pub use application::AccountApplicationService;
pub use db::Database;
pub use error::AccountError;
pub use facade::ConcurrencyFacade;
pub use locks::{LockGuard, LockRegistry};
pub use models::{Account, AccountHistory, AccountNumber, HistoryType};
pub use repository::AccountRepository;
pub use service::AccountService;
pub use types::{HistorySummary, Target, TransferCommand};
