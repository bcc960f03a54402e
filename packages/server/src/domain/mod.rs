//! Domain layer: value objects, entities, pure business rules and the traits
//! the outer layers implement.

pub mod entity;
pub mod error;
pub mod playtime;
pub mod repository;
pub mod value_object;

pub use entity::{
    DailyPlaytime, MessageLog, OpenSession, PlaytimeLedger, Roster, StaffMessage, StaffProfile,
};
pub use error::{PersistenceError, ValueObjectError};
pub use playtime::{PlaytimeSummary, StaffStats, elapsed_minutes, summarize_playtime};
pub use repository::{ActivityRepository, PresenceLookup, SnapshotStore};
pub use value_object::{DateKey, SessionId, StaffId, Timestamp};

#[cfg(test)]
pub use repository::{MockPresenceLookup, MockSnapshotStore};
