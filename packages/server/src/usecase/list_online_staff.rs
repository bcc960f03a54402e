//! UseCase: 接続中スタッフの一覧

use std::sync::Arc;

use crate::domain::{ActivityRepository, PresenceLookup, StaffId};

/// 接続中スタッフ一覧のユースケース
pub struct ListOnlineStaffUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ActivityRepository>,
    /// PresenceLookup（オンライン判定の抽象化）
    presence: Arc<dyn PresenceLookup>,
}

impl ListOnlineStaffUseCase {
    /// 新しい ListOnlineStaffUseCase を作成
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        presence: Arc<dyn PresenceLookup>,
    ) -> Self {
        Self {
            repository,
            presence,
        }
    }

    /// ロスターのうちオンラインのスタッフを名前順で返す
    pub async fn execute(&self) -> Vec<StaffId> {
        let roster = self.repository.roster().await;
        let mut online = Vec::new();
        // Roster is a BTreeMap, so this is already sorted by name.
        for staff in roster.into_keys() {
            if self.presence.is_online(&staff).await {
                online.push(staff);
            }
        }
        online
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockPresenceLookup, SessionId, Timestamp},
        infrastructure::repository::InMemoryActivityRepository,
    };

    fn staff(name: &str) -> StaffId {
        StaffId::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_list_online_filters_roster_and_sorts() {
        // テスト項目: ロスターをオンライン判定で絞り込み、名前順で返す
        // given (前提条件):
        let repository = Arc::new(InMemoryActivityRepository::new());
        for name in ["charlie", "alice", "bob"] {
            repository
                .open_session(SessionId::generate(), staff(name), Timestamp::new(0))
                .await;
        }
        let mut presence = MockPresenceLookup::new();
        presence
            .expect_is_online()
            .returning(|staff| staff.as_str() != "bob");
        let usecase = ListOnlineStaffUseCase::new(repository, Arc::new(presence));

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(result, vec![staff("alice"), staff("charlie")]);
    }

    #[tokio::test]
    async fn test_list_online_with_empty_roster() {
        // テスト項目: ロスターが空なら空のリスト
        let repository = Arc::new(InMemoryActivityRepository::new());
        let mut presence = MockPresenceLookup::new();
        presence.expect_is_online().never();
        let usecase = ListOnlineStaffUseCase::new(repository, Arc::new(presence));

        assert!(usecase.execute().await.is_empty());
    }
}
