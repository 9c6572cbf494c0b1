//! Member collaborator: lookup of the authenticated principal and of
//! friend members. Thin sqlx adapters; no business rules live here.

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::MemberError;
pub use models::Member;
pub use repository::MemberRepository;
pub use service::MemberService;
