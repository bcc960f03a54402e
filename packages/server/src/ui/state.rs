//! Shared state of the HTTP handlers.

use std::sync::Arc;

use crate::usecase::{GetMessagesUseCase, GetPlaytimeUseCase, GetStaffStatsUseCase};

use super::auth::Authenticator;

/// Shared application state
pub struct AppState {
    /// Authenticator（認証方式の抽象化）
    pub authenticator: Arc<dyn Authenticator>,
    /// GetStaffStatsUseCase（スタッフ統計取得のユースケース）
    pub get_staff_stats_usecase: Arc<GetStaffStatsUseCase>,
    /// GetMessagesUseCase（メッセージログ取得のユースケース）
    pub get_messages_usecase: Arc<GetMessagesUseCase>,
    /// GetPlaytimeUseCase（プレイ時間台帳取得のユースケース）
    pub get_playtime_usecase: Arc<GetPlaytimeUseCase>,
}
