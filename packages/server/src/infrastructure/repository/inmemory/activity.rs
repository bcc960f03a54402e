//! InMemory Activity Repository 実装
//!
//! ドメイン層が定義する ActivityRepository trait の具体的な実装。
//! 4 つの構造体をそれぞれ別の `Mutex` で保護します。
//!
//! ## ロックの方針
//!
//! 1 つの操作が同時に 2 つ以上のロックを保持することはありません。
//! `close_session` の「読み取り → 加算 → 書き戻し」は台帳のロック内で完結します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ActivityRepository, DailyPlaytime, DateKey, MessageLog, OpenSession, PlaytimeLedger, Roster,
    SessionId, StaffId, StaffMessage, StaffProfile, Timestamp, elapsed_minutes,
};

/// インメモリ Activity Repository 実装
#[derive(Default)]
pub struct InMemoryActivityRepository {
    /// staff → メッセージ（時系列順）
    messages: Mutex<MessageLog>,
    /// staff → 日付 → 分
    playtime: Mutex<PlaytimeLedger>,
    /// セッション ID → オープン中のセッション
    sessions: Mutex<HashMap<SessionId, OpenSession>>,
    /// 既知のスタッフ
    roster: Mutex<Roster>,
}

impl InMemoryActivityRepository {
    /// 新しい空の InMemoryActivityRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn append_message(&self, staff: StaffId, message: StaffMessage) {
        let mut messages = self.messages.lock().await;
        messages.entry(staff).or_default().push(message);
    }

    async fn open_session(
        &self,
        session: SessionId,
        staff: StaffId,
        started_at: Timestamp,
    ) -> bool {
        {
            let mut sessions = self.sessions.lock().await;
            if sessions
                .insert(session.clone(), OpenSession::new(staff.clone(), started_at))
                .is_some()
            {
                tracing::debug!("Session '{}' was already open, restarting it", session);
            }
        }

        let mut roster = self.roster.lock().await;
        if roster.contains_key(&staff) {
            return false;
        }
        roster.insert(staff, StaffProfile::default());
        true
    }

    async fn close_session(
        &self,
        session: &SessionId,
        staff: &StaffId,
        ended_at: Timestamp,
    ) -> u64 {
        let started_at = {
            let mut sessions = self.sessions.lock().await;
            match sessions.remove(session) {
                Some(open) => open.started_at,
                None => ended_at,
            }
        };

        let minutes = elapsed_minutes(started_at, ended_at);
        let day = DateKey::from_timestamp(ended_at);

        let mut playtime = self.playtime.lock().await;
        let total = playtime
            .entry(staff.clone())
            .or_default()
            .entry(day)
            .or_insert(0);
        *total = total.saturating_add(minutes);

        minutes
    }

    async fn clear_activity(&self) {
        self.messages.lock().await.clear();
        self.playtime.lock().await.clear();
    }

    async fn restore(&self, messages: MessageLog, playtime: PlaytimeLedger, roster: Roster) {
        *self.messages.lock().await = messages;
        *self.playtime.lock().await = playtime;
        *self.roster.lock().await = roster;
    }

    async fn messages(&self) -> MessageLog {
        self.messages.lock().await.clone()
    }

    async fn playtime(&self) -> PlaytimeLedger {
        self.playtime.lock().await.clone()
    }

    async fn daily_playtime(&self, staff: &StaffId) -> Option<DailyPlaytime> {
        self.playtime.lock().await.get(staff).cloned()
    }

    async fn roster(&self) -> Roster {
        self.roster.lock().await.clone()
    }

    async fn open_sessions(&self) -> Vec<(SessionId, OpenSession)> {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .map(|(id, open)| (id.clone(), open.clone()))
            .collect()
    }

    async fn has_open_session(&self, staff: &StaffId) -> bool {
        let sessions = self.sessions.lock().await;
        sessions.values().any(|open| &open.staff == staff)
    }
}
