//! UseCase: セッション開始（スタッフの接続）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BeginSessionUseCase::execute() メソッド
//! - 初めて見るスタッフがロスターに登録され、直ちにロスターが保存されること
//!
//! ### なぜこのテストが必要か
//! - ロスターの変更だけは即時保存する（メッセージ・台帳は終了時に保存）
//! - 保存に失敗してもメモリ上の状態は正しく更新されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規スタッフの接続（保存 1 回）
//! - 正常系：既知スタッフの再接続（保存なし）
//! - 異常系：保存失敗（ログのみ、処理は継続）

use std::sync::Arc;

use staffwatch_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{ActivityRepository, SessionId, SnapshotStore, StaffId, Timestamp};

/// セッション開始のユースケース
pub struct BeginSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ActivityRepository>,
    /// SnapshotStore（永続化の抽象化）
    snapshot_store: Arc<dyn SnapshotStore>,
    /// 時刻の取得元
    clock: Arc<dyn Clock>,
    /// 古いスナップショットが新しいものを上書きしないよう、取得と保存をまとめて直列化する
    roster_flush: Mutex<()>,
}

impl BeginSessionUseCase {
    /// 新しい BeginSessionUseCase を作成
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        snapshot_store: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            snapshot_store,
            clock,
            roster_flush: Mutex::new(()),
        }
    }

    /// セッション開始を実行
    ///
    /// # Arguments
    ///
    /// * `session` - ホストの接続 ID（同じ ID のセッションは上書き）
    /// * `staff` - 接続したスタッフ
    ///
    /// # Returns
    ///
    /// スタッフがロスターに新規登録された場合は `true`
    pub async fn execute(&self, session: SessionId, staff: StaffId) -> bool {
        let started_at = Timestamp::new(self.clock.now_millis());
        let registered = self
            .repository
            .open_session(session.clone(), staff.clone(), started_at)
            .await;
        tracing::info!("Staff '{}' began session '{}'", staff, session);

        if registered {
            tracing::info!("Staff '{}' added to roster", staff);
            self.flush_roster().await;
        }

        registered
    }

    async fn flush_roster(&self) {
        let _guard = self.roster_flush.lock().await;
        let roster = self.repository.roster().await;
        if let Err(e) = self.snapshot_store.save_roster(&roster).await {
            tracing::error!("Failed to save roster: {}", e);
        }
    }
}
