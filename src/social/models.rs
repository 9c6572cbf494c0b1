use crate::core_types::MemberId;

/// Directed friend edge: the owning member considers `to_member_id` a
/// friend (and potential transfer target).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Friend {
    pub to_member_id: MemberId,
}
