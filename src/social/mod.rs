//! Friend-relationship collaborator
//!
//! Supplies the transfer-target picker with the caller's friend list.

pub mod models;
pub mod service;

pub use models::Friend;
pub use service::FriendService;
