//! PresenceLookup backed by the repository's open sessions.
//!
//! A real host answers "is this player connected" itself; standalone, a staff
//! member counts as online while at least one of their sessions is open.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ActivityRepository, PresenceLookup, StaffId};

pub struct SessionPresence {
    repository: Arc<dyn ActivityRepository>,
}

impl SessionPresence {
    pub fn new(repository: Arc<dyn ActivityRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl PresenceLookup for SessionPresence {
    async fn is_online(&self, staff: &StaffId) -> bool {
        self.repository.has_open_session(staff).await
    }
}
