//! Entry point for host lifecycle events.
//!
//! The host calls these only for identities it already treats as staff.

use std::sync::Arc;

use crate::{
    domain::{SessionId, StaffId},
    usecase::{BeginSessionUseCase, EndSessionUseCase, RecordMessageUseCase},
};

pub struct ActivityEventListener {
    begin_session_usecase: Arc<BeginSessionUseCase>,
    end_session_usecase: Arc<EndSessionUseCase>,
    record_message_usecase: Arc<RecordMessageUseCase>,
}

impl ActivityEventListener {
    pub fn new(
        begin_session_usecase: Arc<BeginSessionUseCase>,
        end_session_usecase: Arc<EndSessionUseCase>,
        record_message_usecase: Arc<RecordMessageUseCase>,
    ) -> Self {
        Self {
            begin_session_usecase,
            end_session_usecase,
            record_message_usecase,
        }
    }

    /// A staff member joined
    pub async fn on_presence_begin(&self, session: SessionId, staff: StaffId) {
        self.begin_session_usecase.execute(session, staff).await;
    }

    /// A staff member left
    pub async fn on_presence_end(&self, session: SessionId, staff: StaffId) {
        self.end_session_usecase.execute(session, staff).await;
    }

    /// A staff member said something in chat
    pub async fn on_message(&self, staff: StaffId, text: String) {
        self.record_message_usecase.execute(staff, text).await;
    }
}
