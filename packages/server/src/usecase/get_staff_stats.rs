//! UseCase: スタッフ統計の取得（Stats Projector）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetStaffStatsUseCase::execute() / execute_for() メソッド
//! - ロスター順（名前順）で統計が並ぶこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数日のプレイ時間がある
//! - エッジケース：台帳にエントリが無いスタッフ（すべて 0）
//! - 全削除後：ロスターは残り、統計は 0

use std::sync::Arc;

use crate::domain::{ActivityRepository, PresenceLookup, StaffId, StaffStats};

/// スタッフ統計取得のユースケース
pub struct GetStaffStatsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ActivityRepository>,
    /// PresenceLookup（オンライン判定の抽象化）
    presence: Arc<dyn PresenceLookup>,
}

impl GetStaffStatsUseCase {
    /// 新しい GetStaffStatsUseCase を作成
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        presence: Arc<dyn PresenceLookup>,
    ) -> Self {
        Self {
            repository,
            presence,
        }
    }

    /// ロスターの全スタッフの統計を名前順で返す
    pub async fn execute(&self) -> Vec<StaffStats> {
        let roster = self.repository.roster().await;
        let playtime = self.repository.playtime().await;

        let mut stats = Vec::with_capacity(roster.len());
        for staff in roster.into_keys() {
            let online = self.presence.is_online(&staff).await;
            let daily = playtime.get(&staff);
            stats.push(StaffStats::project(staff, online, daily));
        }
        stats
    }

    /// 指定したスタッフ 1 人分の統計（ロスターに居なくても計算する）
    pub async fn execute_for(&self, staff: &StaffId) -> StaffStats {
        let daily = self.repository.daily_playtime(staff).await;
        let online = self.presence.is_online(staff).await;
        StaffStats::project(staff.clone(), online, daily.as_ref())
    }
}
