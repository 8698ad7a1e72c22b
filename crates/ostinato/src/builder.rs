//! Stateful editing session over a settings value.
//!
//! [`RecurrenceBuilder`] owns the current [`RecurrenceSettings`], the slot
//! list backing the "multiple times daily" mode, and the derived summary
//! text. Every mutation goes through one pipeline: merge the change, tell
//! change listeners, re-derive the summary, and tell summary listeners only
//! if the text actually moved. Because the derivation in
//! [`build_summary`] is pure, comparing the new text against the cached one
//! is a sound change detector.
//!
//! The builder carries an explicit `today` anchor instead of reading the
//! clock on every call, so a whole editing session is reproducible: the
//! date-dependent transitions (seeding an end date, defaulting settings)
//! all resolve against the same day.

use std::fmt;

use chrono::NaiveDate;

use crate::settings::{
    EndKind, Frequency, FrequencyMode, Pattern, RecurrenceSettings, SettingsPatch,
};
use crate::slots::{SlotId, TimeSlots, DEFAULT_MAX_SLOTS};
use crate::summary::build_summary;
use crate::time::{validate_time_range, TimeOfDay, DEFAULT_END_TIME, DEFAULT_TIME};

type ChangeListener = Box<dyn FnMut(&RecurrenceSettings)>;
type SummaryListener = Box<dyn FnMut(&str)>;

/// Editing session: settings, slots, summary cache, and listeners.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ostinato::{Pattern, RecurrenceBuilder};
///
/// let today = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
/// let mut builder = RecurrenceBuilder::new(today);
/// assert!(builder.summary().starts_with("Occurs every day"));
///
/// builder.set_pattern(Pattern::Weekly);
/// assert!(builder.summary().starts_with("Occurs every week on Thu"));
/// ```
pub struct RecurrenceBuilder {
    today: NaiveDate,
    settings: RecurrenceSettings,
    summary: String,
    slots: TimeSlots,
    change_listeners: Vec<ChangeListener>,
    summary_listeners: Vec<SummaryListener>,
}

impl RecurrenceBuilder {
    /// Starts a session from the default settings for `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::seeded(RecurrenceSettings::for_date(today), today)
    }

    /// Starts a session from caller-supplied settings.
    ///
    /// The slot list is reconstructed from the settings when they carry
    /// multiple times; otherwise it starts from the single 9:00 AM seed.
    pub fn seeded(settings: RecurrenceSettings, today: NaiveDate) -> Self {
        let initial_times = match &settings.frequency {
            Frequency::Multiple { times, .. } => times.clone(),
            _ => Vec::new(),
        };
        let summary = build_summary(&settings);
        RecurrenceBuilder {
            today,
            settings,
            summary,
            slots: TimeSlots::new(&initial_times, DEFAULT_MAX_SLOTS),
            change_listeners: Vec::new(),
            summary_listeners: Vec::new(),
        }
    }

    /// Starts a session anchored at the local calendar date.
    pub fn for_today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// Replaces the slot capacity. Existing slots beyond the new capacity
    /// stay; only further additions are refused.
    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        let times = self.slots.times();
        self.slots = TimeSlots::new(&times, max_slots);
        self
    }

    // ── State access ────────────────────────────────────────────────────

    pub fn settings(&self) -> &RecurrenceSettings {
        &self.settings
    }

    /// Summary text for the current settings.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn slots(&self) -> &TimeSlots {
        &self.slots
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    // ── Listeners ───────────────────────────────────────────────────────

    /// Registers a listener called after every accepted change, with the
    /// post-merge settings.
    pub fn on_change(&mut self, listener: impl FnMut(&RecurrenceSettings) + 'static) {
        self.change_listeners.push(Box::new(listener));
    }

    /// Registers a listener called only when a change moved the summary
    /// text. Changes that re-derive to the same sentence stay silent.
    pub fn on_summary_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.summary_listeners.push(Box::new(listener));
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Merges a partial update into the settings.
    pub fn update(&mut self, patch: SettingsPatch) {
        self.settings.apply(patch);
        self.notify();
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.settings.start_date = date;
        self.notify();
    }

    /// Switches the active pattern. The per-pattern records are all kept,
    /// so switching away and back restores what was entered before.
    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.settings.pattern = pattern;
        self.notify();
    }

    /// Toggles a weekday in the weekly day set, keeping it in Sun..Sat
    /// order.
    pub fn toggle_weekly_day(&mut self, day: chrono::Weekday) {
        self.settings.weekly.toggle_day(day);
        self.notify();
    }

    /// Selects how the recurrence ends. Choosing an end-by date for the
    /// first time seeds the date one year from the session's `today`.
    pub fn set_end_kind(&mut self, kind: EndKind) {
        let today = self.today;
        self.settings.end.select(kind, today);
        self.notify();
    }

    pub fn set_occurrences(&mut self, occurrences: u32) {
        self.settings.end.occurrences = occurrences;
        self.notify();
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.settings.end.end_date = Some(date);
        self.notify();
    }

    /// Switches the intra-day mode, seeding the fields the new mode needs.
    ///
    /// - `Once` keeps the previous once-time when there is one, else
    ///   9:00 AM.
    /// - `Multiple` snapshots the current slot list as count and times.
    /// - `Range` keeps previous bounds when present, else 9:00 AM to
    ///   5:00 PM.
    pub fn set_frequency_mode(&mut self, mode: FrequencyMode) {
        let frequency = match mode {
            FrequencyMode::Once => {
                let time = match &self.settings.frequency {
                    Frequency::Once { time: Some(time) } => *time,
                    _ => DEFAULT_TIME,
                };
                Frequency::Once { time: Some(time) }
            }
            FrequencyMode::Multiple => Frequency::Multiple {
                count: Some(self.slots.len() as u32),
                times: self.slots.times(),
            },
            FrequencyMode::Range => {
                let (start, end) = match &self.settings.frequency {
                    Frequency::Range { start, end } => (
                        start.unwrap_or(DEFAULT_TIME),
                        end.unwrap_or(DEFAULT_END_TIME),
                    ),
                    _ => (DEFAULT_TIME, DEFAULT_END_TIME),
                };
                Frequency::Range {
                    start: Some(start),
                    end: Some(end),
                }
            }
        };
        self.settings.frequency = frequency;
        self.notify();
    }

    /// Sets the single firing time. A no-op outside `Once` mode.
    pub fn set_once_time(&mut self, time: TimeOfDay) {
        if let Frequency::Once { time: slot } = &mut self.settings.frequency {
            *slot = Some(time);
            self.notify();
        }
    }

    /// Sets the range start, pushing the end to the next catalog entry
    /// whenever the pair would stop being strictly increasing. At the end
    /// of the catalog the push saturates, so "11:30 PM to 11:30 PM" is the
    /// accepted degenerate pair. A no-op outside `Range` mode.
    pub fn set_range_start(&mut self, start: TimeOfDay) {
        if let Frequency::Range { start: lo, end: hi } = &mut self.settings.frequency {
            let mut end = hi.unwrap_or(DEFAULT_END_TIME);
            if !validate_time_range(start, end) {
                end = start.saturating_next();
            }
            *lo = Some(start);
            *hi = Some(end);
            self.notify();
        }
    }

    /// Sets the range end as given. Unlike start edits, end edits are not
    /// auto-corrected. A no-op outside `Range` mode.
    pub fn set_range_end(&mut self, end: TimeOfDay) {
        if let Frequency::Range { end: hi, .. } = &mut self.settings.frequency {
            *hi = Some(end);
            self.notify();
        }
    }

    // ── Slot edits ──────────────────────────────────────────────────────

    /// Adds a slot (see [`TimeSlots::add`]) and, in `Multiple` mode,
    /// mirrors the new list into the settings.
    pub fn add_time_slot(&mut self) -> Option<SlotId> {
        let id = self.slots.add();
        if id.is_some() {
            self.sync_slots();
        }
        id
    }

    /// Removes a slot (see [`TimeSlots::remove`]).
    pub fn remove_time_slot(&mut self, id: SlotId) -> bool {
        let removed = self.slots.remove(id);
        if removed {
            self.sync_slots();
        }
        removed
    }

    /// Re-times a slot (see [`TimeSlots::set_time`]).
    pub fn set_slot_time(&mut self, id: SlotId, time: TimeOfDay) -> bool {
        let changed = self.slots.set_time(id, time);
        if changed {
            self.sync_slots();
        }
        changed
    }

    /// Mirrors the slot list into the settings while `Multiple` mode is
    /// active. In other modes the list is kept aside untouched, ready for
    /// the next switch to `Multiple`.
    fn sync_slots(&mut self) {
        if matches!(self.settings.frequency, Frequency::Multiple { .. }) {
            self.settings.frequency = Frequency::Multiple {
                count: Some(self.slots.len() as u32),
                times: self.slots.times(),
            };
            self.notify();
        }
    }

    /// Runs the notification pipeline after a settings mutation.
    fn notify(&mut self) {
        let mut change_listeners = std::mem::take(&mut self.change_listeners);
        for listener in &mut change_listeners {
            listener(&self.settings);
        }
        self.change_listeners = change_listeners;

        let summary = build_summary(&self.settings);
        if summary != self.summary {
            self.summary = summary;
            let mut summary_listeners = std::mem::take(&mut self.summary_listeners);
            for listener in &mut summary_listeners {
                listener(&self.summary);
            }
            self.summary_listeners = summary_listeners;
        }
    }
}

impl fmt::Debug for RecurrenceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecurrenceBuilder")
            .field("today", &self.today)
            .field("settings", &self.settings)
            .field("summary", &self.summary)
            .field("slots", &self.slots)
            .field("change_listeners", &self.change_listeners.len())
            .field("summary_listeners", &self.summary_listeners.len())
            .finish()
    }
}
