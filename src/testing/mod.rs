//! Headless helpers for exercising pages without a native platform:
//! a recording style scope, in-memory files and an event log.

mod event_log;
mod files;
mod recording;

pub use event_log::EventLog;
pub use files::MemoryFiles;
pub use recording::{RecordingScope, ScopeStats};
