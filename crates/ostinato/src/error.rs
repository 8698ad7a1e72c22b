//! Error types for ostinato operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OstinatoError {
    #[error("Unknown time label: {0:?} (expected a catalog entry like \"9:00 AM\")")]
    UnknownTime(String),

    #[error("Time catalog index out of range: {0} (catalog has 48 entries)")]
    InvalidTimeIndex(usize),

    #[error("Not a half-hour clock time: {hour:02}:{minute:02}")]
    InvalidClockTime { hour: u32, minute: u32 },
}

pub type Result<T> = std::result::Result<T, OstinatoError>;
