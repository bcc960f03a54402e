//! UseCase: メッセージログ・プレイ時間台帳の取得

use std::sync::Arc;

use crate::domain::{ActivityRepository, MessageLog, PlaytimeLedger};

/// メッセージログ取得のユースケース
pub struct GetMessagesUseCase {
    repository: Arc<dyn ActivityRepository>,
}

impl GetMessagesUseCase {
    pub fn new(repository: Arc<dyn ActivityRepository>) -> Self {
        Self { repository }
    }

    /// 全スタッフのメッセージログ（スナップショット）
    pub async fn execute(&self) -> MessageLog {
        self.repository.messages().await
    }
}

/// プレイ時間台帳取得のユースケース
pub struct GetPlaytimeUseCase {
    repository: Arc<dyn ActivityRepository>,
}

impl GetPlaytimeUseCase {
    pub fn new(repository: Arc<dyn ActivityRepository>) -> Self {
        Self { repository }
    }

    /// 全スタッフのプレイ時間台帳（スナップショット）
    pub async fn execute(&self) -> PlaytimeLedger {
        self.repository.playtime().await
    }
}
