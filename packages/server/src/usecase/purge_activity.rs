//! UseCase: 記録データの全削除（メッセージ + プレイ時間）
//!
//! ロスターは削除しない。削除後、空になった 2 つのドキュメントを直ちに保存する。

use std::sync::Arc;

use crate::domain::{ActivityRepository, SnapshotStore};

/// 全削除のユースケース
pub struct PurgeActivityUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ActivityRepository>,
    /// SnapshotStore（永続化の抽象化）
    snapshot_store: Arc<dyn SnapshotStore>,
}

impl PurgeActivityUseCase {
    /// 新しい PurgeActivityUseCase を作成
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        snapshot_store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            repository,
            snapshot_store,
        }
    }

    /// 全削除を実行
    ///
    /// 保存に失敗してもメモリ上は削除済みのまま（ログのみ）。
    pub async fn execute(&self) {
        self.repository.clear_activity().await;
        tracing::info!("Purged staff messages and playtime");

        let messages = self.repository.messages().await;
        if let Err(e) = self.snapshot_store.save_messages(&messages).await {
            tracing::error!("Failed to save messages after purge: {}", e);
        }
        let playtime = self.repository.playtime().await;
        if let Err(e) = self.snapshot_store.save_playtime(&playtime).await {
            tracing::error!("Failed to save playtime after purge: {}", e);
        }
    }
}
