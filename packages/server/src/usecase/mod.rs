//! UseCase layer: one struct per operation, depending only on domain traits.

mod begin_session;
mod end_session;
mod get_activity;
mod get_staff_stats;
mod list_online_staff;
mod purge_activity;
mod record_message;
mod snapshot;

pub use begin_session::BeginSessionUseCase;
pub use end_session::EndSessionUseCase;
pub use get_activity::{GetMessagesUseCase, GetPlaytimeUseCase};
pub use get_staff_stats::GetStaffStatsUseCase;
pub use list_online_staff::ListOnlineStaffUseCase;
pub use purge_activity::PurgeActivityUseCase;
pub use record_message::RecordMessageUseCase;
pub use snapshot::{RestoreSnapshotUseCase, SaveSnapshotUseCase};
