//! UseCase: スナップショットの復元と保存
//!
//! 起動時に 3 つのドキュメントを読み込み、停止時にすべて書き出す。

use std::sync::Arc;

use crate::domain::{ActivityRepository, PersistenceError, SnapshotStore};

/// 起動時の復元ユースケース
pub struct RestoreSnapshotUseCase {
    repository: Arc<dyn ActivityRepository>,
    snapshot_store: Arc<dyn SnapshotStore>,
}

impl RestoreSnapshotUseCase {
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        snapshot_store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            repository,
            snapshot_store,
        }
    }

    /// 3 つのドキュメントを読み込んでメモリ上の状態を置き換える
    ///
    /// 読み込みに失敗したドキュメントは空として扱われる。
    pub async fn execute(&self) {
        let messages = self.snapshot_store.load_messages().await;
        let playtime = self.snapshot_store.load_playtime().await;
        let roster = self.snapshot_store.load_roster().await;

        tracing::info!(
            "Restored {} message logs, {} playtime entries, {} staff",
            messages.len(),
            playtime.len(),
            roster.len()
        );
        self.repository.restore(messages, playtime, roster).await;
    }
}

/// 停止時の保存ユースケース
pub struct SaveSnapshotUseCase {
    repository: Arc<dyn ActivityRepository>,
    snapshot_store: Arc<dyn SnapshotStore>,
}

impl SaveSnapshotUseCase {
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        snapshot_store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            repository,
            snapshot_store,
        }
    }

    /// 3 つのドキュメントをすべて書き出す
    ///
    /// 1 つが失敗しても残りの書き込みは続ける。最初のエラーを返す。
    pub async fn execute(&self) -> Result<(), PersistenceError> {
        let messages = self.repository.messages().await;
        let playtime = self.repository.playtime().await;
        let roster = self.repository.roster().await;

        let results = [
            ("messages", self.snapshot_store.save_messages(&messages).await),
            ("playtime", self.snapshot_store.save_playtime(&playtime).await),
            ("roster", self.snapshot_store.save_roster(&roster).await),
        ];

        let mut first_error = None;
        for (document, result) in results {
            if let Err(e) = result {
                tracing::error!("Failed to save {}: {}", document, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::info!("Saved all documents");
                Ok(())
            }
        }
    }
}
