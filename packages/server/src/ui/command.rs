//! `/staffmanager <list|purge>` admin command.
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AdminCommandHandler::execute() の返信メッセージ
//! - 権限が無い場合に状態が変更されないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：list（接続中あり / なし）、purge
//! - 異常系：サブコマンド無し、不明なサブコマンド、権限不足
//! - エッジケース：大文字小文字を区別しないサブコマンド

use std::sync::Arc;

use thiserror::Error;

use crate::usecase::{ListOnlineStaffUseCase, PurgeActivityUseCase};

pub const LIST_PERMISSION: &str = "staffmanager.list";
pub const PURGE_PERMISSION: &str = "staffmanager.purge";

pub const NO_PERMISSION: &str = "You don't have a permission !";
pub const NO_STAFF_CONNECTED: &str = "No staff connected.";
pub const DATA_CLEARED: &str = "Staff data has been cleared (messages + playtime).";

/// Whoever issued the command. The host decides what each sender may do.
pub trait CommandSender: Send + Sync {
    fn has_permission(&self, permission: &str) -> bool;
}

/// The operator console holds every permission
pub struct ConsoleSender;

impl CommandSender for ConsoleSender {
    fn has_permission(&self, _permission: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    List,
    Purge,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminCommandError {
    #[error("Usage : /staffmanager <list|purge>")]
    MissingSubcommand,
    #[error("Unknown command. Usage : /staffmanager <list|purge>")]
    UnknownSubcommand(String),
}

impl AdminCommand {
    /// Parse the arguments that follow the command name
    pub fn parse(args: &[&str]) -> Result<Self, AdminCommandError> {
        let subcommand = args.first().ok_or(AdminCommandError::MissingSubcommand)?;
        match subcommand.to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "purge" => Ok(Self::Purge),
            other => Err(AdminCommandError::UnknownSubcommand(other.to_string())),
        }
    }

    pub fn permission(&self) -> &'static str {
        match self {
            Self::List => LIST_PERMISSION,
            Self::Purge => PURGE_PERMISSION,
        }
    }
}

pub struct AdminCommandHandler {
    list_online_staff_usecase: Arc<ListOnlineStaffUseCase>,
    purge_activity_usecase: Arc<PurgeActivityUseCase>,
}

impl AdminCommandHandler {
    pub fn new(
        list_online_staff_usecase: Arc<ListOnlineStaffUseCase>,
        purge_activity_usecase: Arc<PurgeActivityUseCase>,
    ) -> Self {
        Self {
            list_online_staff_usecase,
            purge_activity_usecase,
        }
    }

    /// Run the command and return the reply for the sender
    pub async fn execute(&self, sender: &dyn CommandSender, args: &[&str]) -> String {
        let command = match AdminCommand::parse(args) {
            Ok(command) => command,
            Err(e) => return e.to_string(),
        };

        if !sender.has_permission(command.permission()) {
            return NO_PERMISSION.to_string();
        }

        match command {
            AdminCommand::List => {
                let online = self.list_online_staff_usecase.execute().await;
                if online.is_empty() {
                    NO_STAFF_CONNECTED.to_string()
                } else {
                    let names: Vec<&str> = online.iter().map(|staff| staff.as_str()).collect();
                    format!("Staffs connected : {}", names.join(", "))
                }
            }
            AdminCommand::Purge => {
                self.purge_activity_usecase.execute().await;
                DATA_CLEARED.to_string()
            }
        }
    }
}
