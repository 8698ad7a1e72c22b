//! The recurrence settings model.
//!
//! A [`RecurrenceSettings`] value describes one recurrence rule: the
//! pattern (daily/weekly/monthly/yearly), the intra-day frequency, the end
//! condition, and the start date. All four pattern sub-records are always
//! present and only the one matching [`RecurrenceSettings::pattern`] is
//! active; the inactive ones are retained so switching the pattern back
//! and forth never loses prior input. The same retention policy applies to
//! the end condition's fields.
//!
//! Values are created once via [`RecurrenceSettings::for_date`] and
//! thereafter replaced wholesale through shallow-merge updates
//! ([`RecurrenceSettings::apply`] with a [`SettingsPatch`]); nothing in
//! this crate mutates a settings value behind the caller's back.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::time::{TimeOfDay, DEFAULT_TIME};

// ── Tags ────────────────────────────────────────────────────────────────────

/// The top-level recurrence shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Which week of the month an Nth-weekday rule points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekPosition {
    #[default]
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl WeekPosition {
    /// The word used in summary text: "first", "second", ...
    pub fn label(self) -> &'static str {
        match self {
            WeekPosition::First => "first",
            WeekPosition::Second => "second",
            WeekPosition::Third => "third",
            WeekPosition::Fourth => "fourth",
            WeekPosition::Last => "last",
        }
    }
}

/// Target of an Nth-weekday rule: a concrete weekday, or the "day"
/// sentinel meaning the Nth plain day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NthWeekday {
    #[default]
    Day,
    #[serde(untagged)]
    On(Weekday),
}

/// How the recurrence ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndKind {
    #[default]
    Never,
    After,
    By,
}

/// Intra-day frequency discriminant, without the per-mode payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyMode {
    #[default]
    Once,
    Multiple,
    Range,
}

// ── Pattern sub-records ─────────────────────────────────────────────────────

/// Daily pattern: every N days, or every weekday.
///
/// When `weekdays_only` is set the formatter ignores `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySettings {
    #[serde(default)]
    pub weekdays_only: bool,
    #[serde(default = "one")]
    pub interval: u32,
}

impl Default for DailySettings {
    fn default() -> Self {
        DailySettings {
            weekdays_only: false,
            interval: 1,
        }
    }
}

/// Weekly pattern: every N weeks on a set of weekdays.
///
/// `days` has set semantics and is kept deduplicated and sorted in
/// Sun..Sat order by the helpers here; it may legally be empty (the
/// summary then reads "no days selected").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySettings {
    #[serde(default = "one")]
    pub interval: u32,
    #[serde(default)]
    pub days: Vec<Weekday>,
}

impl Default for WeeklySettings {
    fn default() -> Self {
        WeeklySettings {
            interval: 1,
            days: Vec::new(),
        }
    }
}

impl WeeklySettings {
    /// Adds the day if absent, removes it if present, keeping the set
    /// sorted in Sun..Sat order.
    pub fn toggle_day(&mut self, day: Weekday) {
        match self.days.iter().position(|d| *d == day) {
            Some(i) => {
                self.days.remove(i);
            }
            None => {
                self.days.push(day);
                normalize_days(&mut self.days);
            }
        }
    }

    /// Restores the sorted-and-deduplicated invariant on `days`.
    pub fn normalize(&mut self) {
        normalize_days(&mut self.days);
    }
}

/// Monthly pattern. `use_day` picks between the two mutually exclusive
/// sub-configurations; both are always retained:
///
/// - day-of-month: day `day` of every `interval` months
/// - Nth weekday: the `week` `weekday` of every `pattern_interval` months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySettings {
    #[serde(default = "truthy")]
    pub use_day: bool,
    #[serde(default = "one")]
    pub day: u32,
    #[serde(default = "one")]
    pub interval: u32,
    #[serde(default)]
    pub week: WeekPosition,
    #[serde(default)]
    pub weekday: NthWeekday,
    #[serde(default = "one")]
    pub pattern_interval: u32,
}

impl Default for MonthlySettings {
    fn default() -> Self {
        MonthlySettings {
            use_day: true,
            day: 1,
            interval: 1,
            week: WeekPosition::First,
            weekday: NthWeekday::Day,
            pattern_interval: 1,
        }
    }
}

/// Yearly pattern. Same mutual-exclusion shape as [`MonthlySettings`],
/// keyed by `use_date`:
///
/// - fixed date: every `month` `day`
/// - Nth weekday: the `week` `weekday` of `pattern_month`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySettings {
    #[serde(default = "truthy")]
    pub use_date: bool,
    #[serde(default = "january")]
    pub month: Month,
    #[serde(default = "one")]
    pub day: u32,
    #[serde(default)]
    pub week: WeekPosition,
    #[serde(default)]
    pub weekday: NthWeekday,
    #[serde(default = "january")]
    pub pattern_month: Month,
}

impl Default for YearlySettings {
    fn default() -> Self {
        YearlySettings {
            use_date: true,
            month: Month::January,
            day: 1,
            week: WeekPosition::First,
            weekday: NthWeekday::Day,
            pattern_month: Month::January,
        }
    }
}

// ── End condition ───────────────────────────────────────────────────────────

/// The range of recurrence: never ends, ends after N occurrences, or ends
/// by a date. Only the field matching `kind` is meaningful; the others are
/// retained so switching the kind needs no re-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndSettings {
    #[serde(default)]
    pub kind: EndKind,
    #[serde(default = "ten")]
    pub occurrences: u32,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Default for EndSettings {
    fn default() -> Self {
        EndSettings {
            kind: EndKind::Never,
            occurrences: 10,
            end_date: None,
        }
    }
}

impl EndSettings {
    /// Switches the end kind, retaining the other fields.
    ///
    /// The first selection of [`EndKind::By`] on a value with no end date
    /// seeds one exactly a year after `today`, so the caller never sees an
    /// unset date for the active kind.
    pub fn select(&mut self, kind: EndKind, today: NaiveDate) {
        self.kind = kind;
        if kind == EndKind::By && self.end_date.is_none() {
            self.end_date = Some(one_year_after(today));
        }
    }
}

// ── Intra-day frequency ─────────────────────────────────────────────────────

/// Intra-day repetition: a single time, several explicit times, or a
/// continuous time range.
///
/// Unlike the pattern sub-records this is a true sum type: a mode switch
/// rebuilds the record wholesale (see
/// [`RecurrenceBuilder::set_frequency_mode`](crate::RecurrenceBuilder::set_frequency_mode)),
/// so there is nothing to retain across variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Frequency {
    Once {
        #[serde(default)]
        time: Option<TimeOfDay>,
    },
    Multiple {
        #[serde(default)]
        count: Option<u32>,
        #[serde(default)]
        times: Vec<TimeOfDay>,
    },
    Range {
        #[serde(default)]
        start: Option<TimeOfDay>,
        #[serde(default)]
        end: Option<TimeOfDay>,
    },
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Once {
            time: Some(DEFAULT_TIME),
        }
    }
}

impl Frequency {
    /// The discriminant without the payload.
    pub fn mode(&self) -> FrequencyMode {
        match self {
            Frequency::Once { .. } => FrequencyMode::Once,
            Frequency::Multiple { .. } => FrequencyMode::Multiple,
            Frequency::Range { .. } => FrequencyMode::Range,
        }
    }
}

// ── The settings value ──────────────────────────────────────────────────────

/// One complete recurrence rule.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ostinato::RecurrenceSettings;
///
/// let today = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
/// let settings = RecurrenceSettings::for_date(today);
/// let text = settings.summary();
/// assert!(text.contains("Occurs every day"));
/// assert!(text.contains("with no end date"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceSettings {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub pattern: Pattern,
    #[serde(default)]
    pub daily: DailySettings,
    #[serde(default)]
    pub weekly: WeeklySettings,
    #[serde(default)]
    pub monthly: MonthlySettings,
    #[serde(default)]
    pub yearly: YearlySettings,
    #[serde(default)]
    pub end: EndSettings,
    #[serde(default)]
    pub frequency: Frequency,
}

impl RecurrenceSettings {
    /// Fully populated defaults anchored to `today`.
    ///
    /// Every sub-record is seeded, including the ones the default Daily
    /// pattern does not use, so switching between mutually exclusive
    /// modes later never exposes an unset value: the weekly day set holds
    /// today's weekday, the monthly/yearly records hold today's calendar
    /// fields, the end condition carries 10 occurrences and an end date
    /// 30 days out, and the frequency is once at 9:00 AM.
    pub fn for_date(today: NaiveDate) -> Self {
        RecurrenceSettings {
            start_date: today,
            pattern: Pattern::Daily,
            daily: DailySettings::default(),
            weekly: WeeklySettings {
                interval: 1,
                days: vec![today.weekday()],
            },
            monthly: MonthlySettings {
                use_day: true,
                day: today.day(),
                interval: 1,
                week: WeekPosition::First,
                weekday: NthWeekday::Day,
                pattern_interval: 1,
            },
            yearly: YearlySettings {
                use_date: true,
                month: month_of(today),
                day: today.day(),
                week: WeekPosition::First,
                weekday: NthWeekday::Day,
                pattern_month: month_of(today),
            },
            end: EndSettings {
                kind: EndKind::Never,
                occurrences: 10,
                end_date: Some(today + chrono::Duration::days(30)),
            },
            frequency: Frequency::default(),
        }
    }

    /// [`Self::for_date`] anchored to the local calendar date.
    pub fn for_today() -> Self {
        Self::for_date(chrono::Local::now().date_naive())
    }

    /// Shallow-merges `patch` into this value: each supplied section
    /// replaces its counterpart wholesale, omitted sections are untouched.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(pattern) = patch.pattern {
            self.pattern = pattern;
        }
        if let Some(daily) = patch.daily {
            self.daily = daily;
        }
        if let Some(weekly) = patch.weekly {
            self.weekly = weekly;
        }
        if let Some(monthly) = patch.monthly {
            self.monthly = monthly;
        }
        if let Some(yearly) = patch.yearly {
            self.yearly = yearly;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
    }

    /// The derived plain-English summary. See [`crate::build_summary`].
    pub fn summary(&self) -> String {
        crate::summary::build_summary(self)
    }
}

/// A partial settings value for shallow-merge updates: every section is
/// optional, and a supplied section replaces its counterpart wholesale.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SettingsPatch {
    pub start_date: Option<NaiveDate>,
    pub pattern: Option<Pattern>,
    pub daily: Option<DailySettings>,
    pub weekly: Option<WeeklySettings>,
    pub monthly: Option<MonthlySettings>,
    pub yearly: Option<YearlySettings>,
    pub end: Option<EndSettings>,
    pub frequency: Option<Frequency>,
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Sun..Sat catalog position; the sort key for weekday sets and clause
/// ordering.
pub(crate) fn sunday_rank(day: Weekday) -> u32 {
    day.num_days_from_sunday()
}

/// Sorts ascending in Sun..Sat order and drops duplicates.
pub(crate) fn normalize_days(days: &mut Vec<Weekday>) {
    days.sort_by_key(|d| sunday_rank(*d));
    days.dedup();
}

/// The calendar date one year out. Feb 29 rolls forward to Mar 1 of the
/// next year rather than clamping to Feb 28.
pub(crate) fn one_year_after(date: NaiveDate) -> NaiveDate {
    date.with_year(date.year() + 1).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(date.year() + 1, 3, 1).unwrap_or(date)
    })
}

fn month_of(date: NaiveDate) -> Month {
    Month::try_from(date.month() as u8).unwrap_or(Month::January)
}

fn one() -> u32 {
    1
}

fn ten() -> u32 {
    10
}

fn truthy() -> bool {
    true
}

fn january() -> Month {
    Month::January
}
