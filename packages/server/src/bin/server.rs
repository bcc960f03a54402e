//! Staff activity tracker server.
//!
//! Serves the staff API and, with `--console`, reads host events from stdin.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin staffwatch-server -- --api-token s3cret
//! cargo run --bin staffwatch-server -- --api-token s3cret --http-port 3000 --console
//! ```

use std::sync::Arc;

use clap::Parser;
use staffwatch_server::{
    config::ServerConfig,
    infrastructure::{
        persistence::JsonFileSnapshotStore, presence::SessionPresence,
        repository::InMemoryActivityRepository,
    },
    ui::{
        ActivityEventListener, AdminCommandHandler, Console, QueryTokenAuthenticator, Server,
        shutdown_signal, spawn_console,
    },
    usecase::{
        BeginSessionUseCase, EndSessionUseCase, GetMessagesUseCase, GetPlaytimeUseCase,
        GetStaffStatsUseCase, ListOnlineStaffUseCase, PurgeActivityUseCase, RecordMessageUseCase,
        RestoreSnapshotUseCase, SaveSnapshotUseCase,
    },
};
use staffwatch_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Notify;

#[derive(Parser, Debug)]
#[command(name = "staffwatch-server")]
#[command(about = "Staff activity tracker with an authenticated read-only HTTP API", long_about = None)]
struct Args {
    /// Shared secret expected in the `token` query parameter
    #[arg(long, env = "STAFFWATCH_API_TOKEN", hide_env_values = true)]
    api_token: String,

    /// Host address to bind the HTTP API to
    #[arg(short = 'H', long, env = "STAFFWATCH_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number of the HTTP API
    #[arg(short = 'p', long, env = "STAFFWATCH_HTTP_PORT", default_value = "8080")]
    http_port: u16,

    /// Directory holding messages.json, playtime.json and staffs.json
    #[arg(short = 'd', long, env = "STAFFWATCH_DATA_DIR", default_value = "data")]
    data_dir: String,

    /// Read join/quit/chat events and admin commands from stdin
    #[arg(long)]
    console: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = match ServerConfig::new(args.host, args.http_port, args.api_token, args.data_dir)
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize dependencies in order:
    // 1. Repository / SnapshotStore / Clock / Presence
    // 2. Restore persisted documents
    // 3. UseCases
    // 4. Event listener, admin command, console
    // 5. Server

    // 1. Create Repository (in-memory) and the JSON snapshot store
    let repository = Arc::new(InMemoryActivityRepository::new());
    let snapshot_store = Arc::new(JsonFileSnapshotStore::new(config.data_dir.clone()));
    let clock = Arc::new(SystemClock);
    let presence = Arc::new(SessionPresence::new(repository.clone()));
    tracing::info!("Data directory: {}", snapshot_store.data_dir().display());

    // 2. Hydrate from disk
    RestoreSnapshotUseCase::new(repository.clone(), snapshot_store.clone())
        .execute()
        .await;

    // 3. Create UseCases
    let begin_session_usecase = Arc::new(BeginSessionUseCase::new(
        repository.clone(),
        snapshot_store.clone(),
        clock.clone(),
    ));
    let end_session_usecase = Arc::new(EndSessionUseCase::new(repository.clone(), clock.clone()));
    let record_message_usecase = Arc::new(RecordMessageUseCase::new(repository.clone(), clock));
    let list_online_staff_usecase = Arc::new(ListOnlineStaffUseCase::new(
        repository.clone(),
        presence.clone(),
    ));
    let purge_activity_usecase = Arc::new(PurgeActivityUseCase::new(
        repository.clone(),
        snapshot_store.clone(),
    ));
    let get_staff_stats_usecase =
        Arc::new(GetStaffStatsUseCase::new(repository.clone(), presence));
    let get_messages_usecase = Arc::new(GetMessagesUseCase::new(repository.clone()));
    let get_playtime_usecase = Arc::new(GetPlaytimeUseCase::new(repository.clone()));
    let save_snapshot_usecase = SaveSnapshotUseCase::new(repository.clone(), snapshot_store);

    // 4. Host-facing entry points
    let listener = Arc::new(ActivityEventListener::new(
        begin_session_usecase,
        end_session_usecase.clone(),
        record_message_usecase,
    ));
    let admin_command = Arc::new(AdminCommandHandler::new(
        list_online_staff_usecase,
        purge_activity_usecase,
    ));

    let stop = Arc::new(Notify::new());
    let console_task = args
        .console
        .then(|| spawn_console(Console::new(listener, admin_command), stop.clone()));

    // 5. Create and run the server
    let server = Server::new(
        Arc::new(QueryTokenAuthenticator::new(config.api_token.clone())),
        get_staff_stats_usecase,
        get_messages_usecase,
        get_playtime_usecase,
    );
    let result = server
        .run(&config.host, config.http_port, shutdown_signal(stop))
        .await;

    // No more host events once the server has stopped
    if let Some(console_task) = console_task {
        console_task.shutdown().await;
    }

    // Close what is still open, then flush everything
    let closed = end_session_usecase.close_all().await;
    if closed > 0 {
        tracing::info!("Closed {} open session(s)", closed);
    }
    if save_snapshot_usecase.execute().await.is_err() {
        tracing::warn!("Some documents could not be saved");
    }

    if let Err(e) = result {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
