//! UseCase: セッション終了（スタッフの切断）とプレイ時間の加算
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - EndSessionUseCase::execute() / close_all() メソッド
//! - 経過分数（切り捨て）が終了日の台帳に加算されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：125 分後の切断で 125 分加算
//! - エッジケース：開始直後の切断（0 分、キーは作成される）
//! - エッジケース：対応する開始イベントが無い切断（0 分、エラーにしない）
//! - シャットダウン：オープン中の全セッションを終了

use std::sync::Arc;

use staffwatch_shared::time::Clock;

use crate::domain::{ActivityRepository, SessionId, StaffId, Timestamp};

/// セッション終了のユースケース
pub struct EndSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ActivityRepository>,
    /// 時刻の取得元
    clock: Arc<dyn Clock>,
}

impl EndSessionUseCase {
    /// 新しい EndSessionUseCase を作成
    pub fn new(repository: Arc<dyn ActivityRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// セッション終了を実行
    ///
    /// # Returns
    ///
    /// 今日の台帳に加算した分数
    pub async fn execute(&self, session: SessionId, staff: StaffId) -> u64 {
        let ended_at = Timestamp::new(self.clock.now_millis());
        let minutes = self
            .repository
            .close_session(&session, &staff, ended_at)
            .await;
        tracing::info!(
            "Staff '{}' ended session '{}' after {} minute(s)",
            staff,
            session,
            minutes
        );
        minutes
    }

    /// オープン中のセッションをすべて終了
    ///
    /// # Returns
    ///
    /// 終了したセッション数
    pub async fn close_all(&self) -> usize {
        let sessions = self.repository.open_sessions().await;
        let count = sessions.len();
        for (session, open) in sessions {
            self.execute(session, open.staff).await;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{domain::DateKey, infrastructure::repository::InMemoryActivityRepository};
    use staffwatch_shared::time::ManualClock;

    fn staff(name: &str) -> StaffId {
        StaffId::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_end_session_after_125_minutes() {
        // テスト項目: T0 に開始し T0+125 分に終了すると、当日の台帳が 125 になる
        // given (前提条件):
        let repository = Arc::new(InMemoryActivityRepository::new());
        let clock = Arc::new(ManualClock::new(1_714_557_600_000));
        let usecase = EndSessionUseCase::new(repository.clone(), clock.clone());
        let session = SessionId::generate();
        repository
            .open_session(session.clone(), staff("Bob"), Timestamp::new(clock.now_millis()))
            .await;
        clock.advance(Duration::from_secs(125 * 60));

        // when (操作):
        let minutes = usecase.execute(session, staff("Bob")).await;

        // then (期待する結果):
        assert_eq!(minutes, 125);
        let today = DateKey::from_timestamp(Timestamp::new(clock.now_millis()));
        let daily = repository.daily_playtime(&staff("Bob")).await.unwrap();
        assert_eq!(daily[&today], 125);
    }

    #[tokio::test]
    async fn test_end_session_immediately_adds_zero() {
        // テスト項目: 開始直後の終了は 0 分、オープン中のセッションは削除される
        // given (前提条件):
        let repository = Arc::new(InMemoryActivityRepository::new());
        let clock = Arc::new(ManualClock::new(1_714_557_600_000));
        let usecase = EndSessionUseCase::new(repository.clone(), clock.clone());
        let session = SessionId::generate();
        repository
            .open_session(session.clone(), staff("alice"), Timestamp::new(clock.now_millis()))
            .await;

        // when (操作):
        let minutes = usecase.execute(session.clone(), staff("alice")).await;
        let again = usecase.execute(session, staff("alice")).await;

        // then (期待する結果):
        assert_eq!(minutes, 0);
        assert_eq!(again, 0);
        assert!(repository.open_sessions().await.is_empty());
        let today = DateKey::from_timestamp(Timestamp::new(clock.now_millis()));
        assert_eq!(
            repository.daily_playtime(&staff("alice")).await.unwrap()[&today],
            0
        );
    }

    #[tokio::test]
    async fn test_end_session_without_begin_is_silent_zero() {
        // テスト項目: 開始イベントが無い終了は 0 分として扱われる
        // given (前提条件):
        let repository = Arc::new(InMemoryActivityRepository::new());
        let usecase = EndSessionUseCase::new(repository.clone(), Arc::new(ManualClock::new(0)));

        // when (操作):
        let minutes = usecase.execute(SessionId::generate(), staff("ghost")).await;

        // then (期待する結果):
        assert_eq!(minutes, 0);
    }

    #[tokio::test]
    async fn test_close_all_accrues_every_open_session() {
        // テスト項目: シャットダウン時にオープン中の全セッションが終了・加算される
        // given (前提条件):
        let repository = Arc::new(InMemoryActivityRepository::new());
        let clock = Arc::new(ManualClock::new(1_714_557_600_000));
        let usecase = EndSessionUseCase::new(repository.clone(), clock.clone());
        let start = Timestamp::new(clock.now_millis());
        repository
            .open_session(SessionId::generate(), staff("alice"), start)
            .await;
        repository
            .open_session(SessionId::generate(), staff("bob"), start)
            .await;
        clock.advance(Duration::from_secs(30 * 60));

        // when (操作):
        let closed = usecase.close_all().await;

        // then (期待する結果):
        assert_eq!(closed, 2);
        assert!(repository.open_sessions().await.is_empty());
        let playtime = repository.playtime().await;
        assert_eq!(playtime[&staff("alice")].values().sum::<u64>(), 30);
        assert_eq!(playtime[&staff("bob")].values().sum::<u64>(), 30);
    }
}
