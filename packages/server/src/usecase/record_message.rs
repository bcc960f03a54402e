//! UseCase: スタッフのチャットメッセージ記録
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RecordMessageUseCase::execute() メソッド
//! - 注入した Clock の時刻でタイムスタンプが付与されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージがログ末尾に追加される
//! - エッジケース：空文字列のメッセージ（制限なし、そのまま記録）

use std::sync::Arc;

use staffwatch_shared::time::Clock;

use crate::domain::{ActivityRepository, StaffId, StaffMessage, Timestamp};

/// メッセージ記録のユースケース
pub struct RecordMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ActivityRepository>,
    /// 時刻の取得元
    clock: Arc<dyn Clock>,
}

impl RecordMessageUseCase {
    /// 新しい RecordMessageUseCase を作成
    pub fn new(repository: Arc<dyn ActivityRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// メッセージ記録を実行
    ///
    /// # Returns
    ///
    /// 記録したメッセージ（Domain Model）
    pub async fn execute(&self, staff: StaffId, text: String) -> StaffMessage {
        let message = StaffMessage::new(text, Timestamp::new(self.clock.now_millis()));
        self.repository
            .append_message(staff.clone(), message.clone())
            .await;
        tracing::debug!("Recorded message from '{}'", staff);
        message
    }
}
