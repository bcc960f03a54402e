//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    DailyPlaytime, DateKey, MessageLog, PlaytimeLedger, Roster, StaffId, StaffMessage,
    StaffProfile, StaffStats,
};

use super::{
    document::{MessageRecord, MessagesDocument, PlaytimeDocument, RosterDocument},
    http::StaffStatsDto,
};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<MessageRecord> for StaffMessage {
    fn from(record: MessageRecord) -> Self {
        StaffMessage::from_parts(record.message, record.timestamp)
    }
}

/// Entries with an invalid staff id are skipped (logged), the rest are kept.
pub fn messages_from_document(document: MessagesDocument) -> MessageLog {
    let mut log = MessageLog::new();
    for (staff, records) in document {
        match StaffId::new(staff) {
            Ok(staff) => {
                log.insert(staff, records.into_iter().map(StaffMessage::from).collect());
            }
            Err(e) => tracing::warn!("Skipping messages entry: {}", e),
        }
    }
    log
}

/// Staff with an invalid id and days with an invalid date key are skipped
/// (logged); everything else is kept.
pub fn playtime_from_document(document: PlaytimeDocument) -> PlaytimeLedger {
    let mut ledger = PlaytimeLedger::new();
    for (staff, days) in document {
        let staff = match StaffId::new(staff) {
            Ok(staff) => staff,
            Err(e) => {
                tracing::warn!("Skipping playtime entry: {}", e);
                continue;
            }
        };

        let mut daily = DailyPlaytime::new();
        for (day, minutes) in days {
            match DateKey::parse(&day) {
                Ok(day) => {
                    daily.insert(day, minutes);
                }
                Err(e) => tracing::warn!("Skipping playtime of '{}': {}", staff, e),
            }
        }
        ledger.insert(staff, daily);
    }
    ledger
}

/// Entries with an invalid staff id are skipped (logged), the rest are kept.
pub fn roster_from_document(document: RosterDocument) -> Roster {
    let mut roster = Roster::new();
    for (staff, profile) in document {
        match StaffId::new(staff) {
            Ok(staff) => {
                roster.insert(staff, StaffProfile::new(profile));
            }
            Err(e) => tracing::warn!("Skipping roster entry: {}", e),
        }
    }
    roster
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&StaffMessage> for MessageRecord {
    fn from(message: &StaffMessage) -> Self {
        Self {
            message: message.text.clone(),
            timestamp: message.timestamp.clone(),
        }
    }
}

impl From<StaffStats> for StaffStatsDto {
    fn from(stats: StaffStats) -> Self {
        Self {
            name: stats.staff.into_string(),
            online: stats.online,
            total_connections: stats.total_connections,
            average_time: stats.average_time,
            active_days: stats.active_days,
        }
    }
}

pub fn messages_to_document(messages: &MessageLog) -> MessagesDocument {
    messages
        .iter()
        .map(|(staff, log)| {
            (
                staff.as_str().to_string(),
                log.iter().map(MessageRecord::from).collect(),
            )
        })
        .collect()
}

pub fn playtime_to_document(playtime: &PlaytimeLedger) -> PlaytimeDocument {
    playtime
        .iter()
        .map(|(staff, daily)| {
            (
                staff.as_str().to_string(),
                daily
                    .iter()
                    .map(|(day, minutes)| (day.to_string(), *minutes))
                    .collect(),
            )
        })
        .collect()
}

pub fn roster_to_document(roster: &Roster) -> RosterDocument {
    roster
        .iter()
        .map(|(staff, profile)| (staff.as_str().to_string(), profile.value().clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_message_record_to_domain() {
        // テスト項目: MessageRecord がドメインエンティティに変換される（タイムスタンプはそのまま）
        // given (前提条件):
        let record = MessageRecord {
            message: "hello".to_string(),
            timestamp: "2024-05-01 10:00:00".to_string(),
        };

        // when (操作):
        let message: StaffMessage = record.into();

        // then (期待する結果):
        assert_eq!(message.text, "hello");
        assert_eq!(message.timestamp, "2024-05-01 10:00:00");
    }

    #[test]
    fn test_playtime_document_round_trip() {
        // テスト項目: 台帳 → ドキュメント → 台帳 で内容が変わらない
        // given (前提条件):
        let mut document = PlaytimeDocument::new();
        document.insert(
            "bob".to_string(),
            BTreeMap::from([
                ("2024-05-01".to_string(), 125),
                ("2024-05-03".to_string(), 0),
            ]),
        );

        // when (操作):
        let ledger = playtime_from_document(document.clone());

        // then (期待する結果):
        let bob = StaffId::new("bob".to_string()).unwrap();
        assert_eq!(ledger[&bob][&DateKey::parse("2024-05-01").unwrap()], 125);
        assert_eq!(playtime_to_document(&ledger), document);
    }

    #[test]
    fn test_playtime_bad_date_key_skips_only_that_day() {
        // テスト項目: 不正な日付キーはその日だけ読み飛ばし、他のスタッフ・他の日は残す
        // given (前提条件):
        let mut document = PlaytimeDocument::new();
        document.insert(
            "Alice".to_string(),
            BTreeMap::from([
                ("2024-05-01".to_string(), 300),
                ("2024-05-02".to_string(), 120),
            ]),
        );
        document.insert(
            "Bob".to_string(),
            BTreeMap::from([
                ("legacy".to_string(), 5),
                ("2024-05-01".to_string(), 7),
            ]),
        );

        // when (操作):
        let ledger = playtime_from_document(document);

        // then (期待する結果):
        let alice = StaffId::new("Alice".to_string()).unwrap();
        let bob = StaffId::new("Bob".to_string()).unwrap();
        assert_eq!(ledger[&alice].values().sum::<u64>(), 420);
        assert_eq!(ledger[&bob].len(), 1);
        assert_eq!(ledger[&bob][&DateKey::parse("2024-05-01").unwrap()], 7);
    }

    #[test]
    fn test_playtime_non_padded_key_does_not_overwrite_canonical_day() {
        // テスト項目: "2024-5-1" のようなキーが "2024-05-01" の値を上書きしない
        // given (前提条件): BTreeMap の順では "2024-5-1" が後に来る
        let mut document = PlaytimeDocument::new();
        document.insert(
            "Alice".to_string(),
            BTreeMap::from([
                ("2024-05-01".to_string(), 300),
                ("2024-5-1".to_string(), 10),
            ]),
        );

        // when (操作):
        let ledger = playtime_from_document(document);

        // then (期待する結果):
        let mut expected = PlaytimeDocument::new();
        expected.insert(
            "Alice".to_string(),
            BTreeMap::from([("2024-05-01".to_string(), 300)]),
        );
        assert_eq!(playtime_to_document(&ledger), expected);
    }

    #[test]
    fn test_roster_document_keeps_opaque_metadata() {
        // テスト項目: ロスターのメタデータは中身を解釈せずに保持される
        // given (前提条件):
        let mut document = RosterDocument::new();
        document.insert("alice".to_string(), serde_json::json!({"rank": "mod"}));
        document.insert("bob".to_string(), serde_json::json!({}));

        // when (操作):
        let roster = roster_from_document(document.clone());

        // then (期待する結果):
        assert_eq!(roster.len(), 2);
        assert_eq!(roster_to_document(&roster), document);
    }

    #[test]
    fn test_empty_staff_id_entry_is_skipped() {
        // テスト項目: 空のスタッフ ID のエントリだけが読み飛ばされる
        // given (前提条件):
        let mut messages = MessagesDocument::new();
        messages.insert(String::new(), vec![]);
        messages.insert(
            "alice".to_string(),
            vec![MessageRecord {
                message: "hi".to_string(),
                timestamp: "2024-05-01 10:00:00".to_string(),
            }],
        );
        let mut roster = RosterDocument::new();
        roster.insert(String::new(), serde_json::json!({}));
        roster.insert("alice".to_string(), serde_json::json!({}));

        // when (操作):
        let log = messages_from_document(messages);
        let roster = roster_from_document(roster);

        // then (期待する結果):
        let alice = StaffId::new("alice".to_string()).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[&alice][0].text, "hi");
        assert_eq!(roster.len(), 1);
        assert!(roster.contains_key(&alice));
    }

    #[test]
    fn test_staff_stats_to_dto_uses_camel_case() {
        // テスト項目: 統計 DTO は camelCase のキーでシリアライズされる
        // given (前提条件):
        let stats = StaffStats {
            staff: StaffId::new("alice".to_string()).unwrap(),
            online: false,
            total_connections: 2,
            average_time: 12.5,
            active_days: 2,
        };

        // when (操作):
        let dto: StaffStatsDto = stats.into();
        let json = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "name": "alice",
                "online": false,
                "totalConnections": 2,
                "averageTime": 12.5,
                "activeDays": 2
            })
        );
    }
}
