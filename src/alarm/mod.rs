//! Notification collaborator
//!
//! Money movements end with a best-effort alarm to the affected members.
//! Delivery is explicitly outside the consistency boundary: it runs after
//! the movement committed and its locks were released, and a failure is
//! logged, never surfaced to the caller.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::info;

use crate::core_types::MemberId;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

/// Outcome carried by an alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Success,
    Fail,
}

/// Kind of movement the alarm refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Deposit,
    Withdraw,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlarmMessage {
    pub status: TaskStatus,
    pub task: TaskType,
}

impl AlarmMessage {
    pub fn new(status: TaskStatus, task: TaskType) -> Self {
        Self { status, task }
    }
}

/// Delivery seam. Implementations must be cheap to call and must not
/// assume the caller handles their errors beyond logging.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, member_id: MemberId, message: AlarmMessage) -> Result<(), NotifyError>;
}

/// Production default: structured log line per alarm. A real deployment
/// swaps this for a push/webhook implementation behind the same trait.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, member_id: MemberId, message: AlarmMessage) -> Result<(), NotifyError> {
        info!(
            member_id = %member_id,
            status = ?message.status,
            task = ?message.task,
            "alarm dispatched"
        );
        Ok(())
    }
}

/// Test double: records every alarm and can be told to fail.
pub struct RecordingNotifier {
    sent: Mutex<Vec<(MemberId, AlarmMessage)>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(MemberId, AlarmMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, member_id: MemberId, message: AlarmMessage) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::ChannelUnavailable("recording notifier set to fail".into()));
        }
        self.sent.lock().unwrap().push((member_id, message));
        Ok(())
    }
}
