//! Outer surfaces: the HTTP API, the admin command, host events and the
//! operator console.

pub mod auth;
pub mod command;
pub mod console;
pub mod events;
mod handler;
mod server;
pub mod signal;
pub mod state;

pub use auth::{AuthError, Authenticator, Credentials, QueryTokenAuthenticator};
pub use command::{AdminCommand, AdminCommandHandler, CommandSender, ConsoleSender};
pub use console::{Console, ConsoleTask, spawn_console};
pub use events::ActivityEventListener;
pub use server::Server;
pub use signal::shutdown_signal;
