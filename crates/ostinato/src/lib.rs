//! # ostinato
//!
//! Recurrence rules people can read back.
//!
//! Ostinato models the settings behind a "repeat this…" dialog (daily,
//! weekly, monthly, and yearly patterns, intra-day firing times, and end
//! conditions) and derives a single plain-English sentence from them, such
//! as "Occurs every 2 weeks on Mon, Wed at 9:00 AM for 10 occurrences,
//! effective Thursday, August 14, 2025". Derivation is pure and total:
//! equal settings always yield the identical sentence, and every settings
//! value yields one.
//!
//! All date-dependent behavior runs against explicit "today" anchors
//! supplied by the caller, so sessions replay deterministically.
//!
//! ## Modules
//!
//! - [`settings`] — The settings model: patterns, frequency, end conditions, defaults, patch merge
//! - [`summary`] — Pure settings → sentence derivation
//! - [`time`] — The fixed half-hour time-of-day catalog ("12:00 AM" … "11:30 PM")
//! - [`slots`] — Identity-stable editing of multiple intra-day times
//! - [`builder`] — Stateful editing session with change/summary listeners
//! - [`error`] — Error types

pub mod builder;
pub mod error;
pub mod settings;
pub mod slots;
pub mod summary;
pub mod time;

pub use builder::RecurrenceBuilder;
pub use error::{OstinatoError, Result};
pub use settings::{
    DailySettings, EndKind, EndSettings, Frequency, FrequencyMode, MonthlySettings, NthWeekday,
    Pattern, RecurrenceSettings, SettingsPatch, WeekPosition, WeeklySettings, YearlySettings,
};
pub use slots::{SlotId, TimeSlot, TimeSlots, DEFAULT_MAX_SLOTS};
pub use summary::{build_summary, format_long_date};
pub use time::{validate_time_range, TimeOfDay, DEFAULT_END_TIME, DEFAULT_TIME};
