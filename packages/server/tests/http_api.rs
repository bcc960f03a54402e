//! Integration tests for the staff HTTP API, served in-process on an
//! ephemeral port.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use reqwest::{StatusCode, header};
use staffwatch_server::{
    domain::{DateKey, SessionId, StaffId, Timestamp},
    infrastructure::{
        persistence::JsonFileSnapshotStore, presence::SessionPresence,
        repository::InMemoryActivityRepository,
    },
    ui::{ActivityEventListener, QueryTokenAuthenticator, Server},
    usecase::{
        BeginSessionUseCase, EndSessionUseCase, GetMessagesUseCase, GetPlaytimeUseCase,
        GetStaffStatsUseCase, RecordMessageUseCase,
    },
};
use staffwatch_shared::time::{Clock, ManualClock, format_message_timestamp};
use tempfile::TempDir;
use tokio::task::JoinHandle;

const TOKEN: &str = "VALID";
/// 2024-05-01 12:00:00 UTC
const T0: i64 = 1_714_564_800_000;

/// Helper struct to manage the in-process server lifecycle
struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    listener: ActivityEventListener,
    clock: Arc<ManualClock>,
    _data_dir: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let data_dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(InMemoryActivityRepository::new());
        let snapshot_store = Arc::new(JsonFileSnapshotStore::new(data_dir.path()));
        let clock = Arc::new(ManualClock::new(T0));
        let presence = Arc::new(SessionPresence::new(repository.clone()));

        let listener = ActivityEventListener::new(
            Arc::new(BeginSessionUseCase::new(
                repository.clone(),
                snapshot_store,
                clock.clone(),
            )),
            Arc::new(EndSessionUseCase::new(repository.clone(), clock.clone())),
            Arc::new(RecordMessageUseCase::new(repository.clone(), clock.clone())),
        );

        let router = Server::new(
            Arc::new(QueryTokenAuthenticator::new(TOKEN)),
            Arc::new(GetStaffStatsUseCase::new(repository.clone(), presence)),
            Arc::new(GetMessagesUseCase::new(repository.clone())),
            Arc::new(GetPlaytimeUseCase::new(repository)),
        )
        .into_router();

        let tcp = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = tcp.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(tcp, router).await.unwrap();
        });

        TestServer {
            addr,
            handle,
            listener,
            clock,
            _data_dir: data_dir,
        }
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn staff(name: &str) -> StaffId {
    StaffId::new(name.to_string()).unwrap()
}

#[tokio::test]
async fn test_messages_endpoint_returns_recorded_message() {
    // テスト項目: Alice の発言が /staffs/messages にそのまま現れる
    // given (前提条件):
    let server = TestServer::start().await;
    server
        .listener
        .on_message(staff("Alice"), "hello".to_string())
        .await;

    // when (操作):
    let response = reqwest::get(server.url("/staffs/messages?token=VALID"))
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert_eq!(
        body,
        format!(
            r#"{{"Alice":[{{"message":"hello","timestamp":"{}"}}]}}"#,
            format_message_timestamp(T0)
        )
    );
}

#[tokio::test]
async fn test_wrong_token_is_forbidden() {
    // テスト項目: 不正なトークンは 403（ボディは空）
    // given (前提条件):
    let server = TestServer::start().await;

    for path in [
        "/staffs?token=WRONG",
        "/staffs/messages?token=WRONG",
        "/staffs/playtime",
    ] {
        // when (操作):
        let response = reqwest::get(server.url(path)).await.unwrap();

        // then (期待する結果):
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{path}");
        assert!(response.bytes().await.unwrap().is_empty(), "{path}");
    }
}

#[tokio::test]
async fn test_non_get_on_staffs_is_method_not_allowed() {
    // テスト項目: /staffs への GET 以外は 405（トークンの確認より先）
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let with_token = client
        .post(server.url("/staffs?token=VALID"))
        .send()
        .await
        .unwrap();
    let without_token = client.delete(server.url("/staffs")).send().await.unwrap();

    // then (期待する結果):
    assert_eq!(with_token.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(with_token.bytes().await.unwrap().is_empty());
    assert_eq!(without_token.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_other_routes_accept_any_method() {
    // テスト項目: /staffs/messages と /staffs/playtime はメソッドを制限しない
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .post(server.url("/staffs/playtime?token=VALID"))
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "{}");
}

#[tokio::test]
async fn test_json_headers() {
    // テスト項目: Content-Type と Content-Length がボディと一致する
    // given (前提条件):
    let server = TestServer::start().await;
    server
        .listener
        .on_message(staff("Alice"), "ünïcødé".to_string())
        .await;

    // when (操作):
    let response = reqwest::get(server.url("/staffs/messages?token=VALID"))
        .await
        .unwrap();

    // then (期待する結果):
    let content_type = response.headers()[header::CONTENT_TYPE].clone();
    let content_length: usize = response.headers()[header::CONTENT_LENGTH]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    let body = response.bytes().await.unwrap();
    assert_eq!(content_type, "application/json; charset=utf-8");
    assert_eq!(content_length, body.len());
}

#[tokio::test]
async fn test_playtime_after_session() {
    // テスト項目: Bob が 125 分接続すると当日の台帳が 125 になる
    // given (前提条件):
    let server = TestServer::start().await;
    let session = SessionId::generate();
    server
        .listener
        .on_presence_begin(session.clone(), staff("Bob"))
        .await;
    server.clock.advance(Duration::from_secs(125 * 60));
    server.listener.on_presence_end(session, staff("Bob")).await;

    // when (操作):
    let response = reqwest::get(server.url("/staffs/playtime?token=VALID"))
        .await
        .unwrap();

    // then (期待する結果):
    let today = DateKey::from_timestamp(Timestamp::new(server.clock.now_millis())).to_string();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body.as_object().unwrap().len(), 1);
    assert_eq!(body["Bob"][today.as_str()], 125);
}

#[tokio::test]
async fn test_staffs_stats_shape() {
    // テスト項目: /staffs は名前順の統計配列を返す（オンライン判定を含む）
    // given (前提条件): Bob は 30 分接続して切断、Alice は接続中
    let server = TestServer::start().await;
    let bob_session = SessionId::generate();
    server
        .listener
        .on_presence_begin(bob_session.clone(), staff("Bob"))
        .await;
    server.clock.advance(Duration::from_secs(30 * 60));
    server
        .listener
        .on_presence_end(bob_session, staff("Bob"))
        .await;
    server
        .listener
        .on_presence_begin(SessionId::generate(), staff("Alice"))
        .await;

    // when (操作):
    let response = reqwest::get(server.url("/staffs?token=VALID")).await.unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!([
            {
                "name": "Alice",
                "online": true,
                "totalConnections": 0,
                "averageTime": 0.0,
                "activeDays": 0
            },
            {
                "name": "Bob",
                "online": false,
                "totalConnections": 1,
                "averageTime": 30.0,
                "activeDays": 1
            }
        ])
    );
}
