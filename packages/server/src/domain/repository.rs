//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    DailyPlaytime, MessageLog, OpenSession, PersistenceError, PlaytimeLedger, Roster, SessionId,
    StaffId, StaffMessage, Timestamp,
};

/// Activity Repository trait
///
/// メッセージログ・プレイ時間台帳・ロスター・オープン中セッションの 4 つを保持する。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// 各操作は並行に呼ばれても安全でなければならず、読み取り側が
/// 途中まで適用された更新を観測してはならない。
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// メッセージをスタッフのログ末尾に追加
    async fn append_message(&self, staff: StaffId, message: StaffMessage);

    /// セッションを開始（同じ SessionId のエントリは上書き）
    ///
    /// # Returns
    ///
    /// スタッフがロスターに新規登録された場合は `true`
    async fn open_session(
        &self,
        session: SessionId,
        staff: StaffId,
        started_at: Timestamp,
    ) -> bool;

    /// セッションを終了し、経過分数を `ended_at` の日付に加算
    ///
    /// 対応するセッションが無い場合は開始時刻 = `ended_at` として扱う（0 分）。
    ///
    /// # Returns
    ///
    /// 加算した分数
    async fn close_session(
        &self,
        session: &SessionId,
        staff: &StaffId,
        ended_at: Timestamp,
    ) -> u64;

    /// メッセージログとプレイ時間台帳を空にする（ロスターは保持）
    async fn clear_activity(&self);

    /// 3 つのドキュメントを丸ごと置き換える（起動時の復元用）
    async fn restore(&self, messages: MessageLog, playtime: PlaytimeLedger, roster: Roster);

    /// メッセージログのスナップショット
    async fn messages(&self) -> MessageLog;

    /// プレイ時間台帳のスナップショット
    async fn playtime(&self) -> PlaytimeLedger;

    /// 1 人分のプレイ時間
    async fn daily_playtime(&self, staff: &StaffId) -> Option<DailyPlaytime>;

    /// ロスターのスナップショット
    async fn roster(&self) -> Roster;

    /// オープン中のセッション一覧
    async fn open_sessions(&self) -> Vec<(SessionId, OpenSession)>;

    /// スタッフにオープン中のセッションがあるか
    async fn has_open_session(&self, staff: &StaffId) -> bool;
}

/// Snapshot Store trait
///
/// 3 つのドキュメントの永続化。読み込みは失敗しても空のドキュメントを返す（fail-open）。
/// 書き込みの失敗は呼び出し元がログに残し、メモリ上の状態はそのまま保持する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn load_messages(&self) -> MessageLog;

    async fn load_playtime(&self) -> PlaytimeLedger;

    async fn load_roster(&self) -> Roster;

    async fn save_messages(&self, messages: &MessageLog) -> Result<(), PersistenceError>;

    async fn save_playtime(&self, playtime: &PlaytimeLedger) -> Result<(), PersistenceError>;

    async fn save_roster(&self, roster: &Roster) -> Result<(), PersistenceError>;
}

/// Presence Lookup trait
///
/// スタッフが現在オンラインかどうか。ホスト側が提供する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceLookup: Send + Sync {
    async fn is_online(&self, staff: &StaffId) -> bool;
}
