//! Input record types

pub mod event_record;
pub mod song_record;

pub use event_record::{EventBatch, EventRecord, PlayEvent, SkipReason, SkippedEvent};
pub use song_record::SongRecord;
