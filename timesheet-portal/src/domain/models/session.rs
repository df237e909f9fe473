use super::UserId;

/// Identity of the logged-in user. Only rows owned by this user can be edited or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: UserId,
}

impl SessionContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
