//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::any};
use tower_http::trace::TraceLayer;

use crate::usecase::{GetMessagesUseCase, GetPlaytimeUseCase, GetStaffStatsUseCase};

use super::{
    auth::Authenticator,
    handler::{list_messages, list_playtime, list_staffs},
    state::AppState,
};

/// Read-only staff activity HTTP API
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     authenticator,
///     get_staff_stats_usecase,
///     get_messages_usecase,
///     get_playtime_usecase,
/// );
/// server.run("0.0.0.0", 8080, shutdown_signal(stop)).await?;
/// ```
pub struct Server {
    /// Authenticator（認証方式の抽象化）
    authenticator: Arc<dyn Authenticator>,
    /// GetStaffStatsUseCase（スタッフ統計取得のユースケース）
    get_staff_stats_usecase: Arc<GetStaffStatsUseCase>,
    /// GetMessagesUseCase（メッセージログ取得のユースケース）
    get_messages_usecase: Arc<GetMessagesUseCase>,
    /// GetPlaytimeUseCase（プレイ時間台帳取得のユースケース）
    get_playtime_usecase: Arc<GetPlaytimeUseCase>,
}

impl Server {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        get_staff_stats_usecase: Arc<GetStaffStatsUseCase>,
        get_messages_usecase: Arc<GetMessagesUseCase>,
        get_playtime_usecase: Arc<GetPlaytimeUseCase>,
    ) -> Self {
        Self {
            authenticator,
            get_staff_stats_usecase,
            get_messages_usecase,
            get_playtime_usecase,
        }
    }

    /// Build the router without binding a socket
    ///
    /// Routes accept every method; `/staffs` rejects non-GET itself so the
    /// response is an empty 405.
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            authenticator: self.authenticator,
            get_staff_stats_usecase: self.get_staff_stats_usecase,
            get_messages_usecase: self.get_messages_usecase,
            get_playtime_usecase: self.get_playtime_usecase,
        });

        Router::new()
            .route("/staffs", any(list_staffs))
            .route("/staffs/messages", any(list_messages))
            .route("/staffs/playtime", any(list_playtime))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the HTTP API until `shutdown` resolves
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run<F>(
        self,
        host: &str,
        port: u16,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.into_router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Staff API listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");

        Ok(())
    }
}
