//! Settings-to-summary derivation.
//!
//! [`build_summary`] turns a [`RecurrenceSettings`] value into one English
//! sentence, assembled from four independently formatted clauses: the
//! pattern ("Occurs every 2 weeks on Mon, Wed"), the intra-day frequency
//! (" at 9:00 AM"), the range of recurrence ("with no end date"), and the
//! start date (", effective Thursday, August 14, 2025").
//!
//! The derivation is a pure function: no clock access, no side effects,
//! and total over every settings value. Degenerate inputs get a defined
//! fallback (the literal "no days selected", an empty clause) instead of a
//! failure path. Equal inputs always produce byte-identical output, which
//! is what lets the builder layer compare summaries to decide whether to
//! notify listeners.

use chrono::NaiveDate;

use crate::settings::{
    normalize_days, DailySettings, EndKind, EndSettings, Frequency, MonthlySettings, NthWeekday,
    Pattern, RecurrenceSettings, WeeklySettings, YearlySettings,
};

/// Derives the one-sentence summary for a settings value.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ostinato::{build_summary, RecurrenceSettings};
///
/// let today = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
/// let settings = RecurrenceSettings::for_date(today);
/// assert_eq!(
///     build_summary(&settings),
///     "Occurs every day at 9:00 AM with no end date, effective Thursday, August 14, 2025"
/// );
/// ```
pub fn build_summary(settings: &RecurrenceSettings) -> String {
    let pattern = match settings.pattern {
        Pattern::Daily => daily_clause(&settings.daily),
        Pattern::Weekly => weekly_clause(&settings.weekly),
        Pattern::Monthly => monthly_clause(&settings.monthly),
        Pattern::Yearly => yearly_clause(&settings.yearly),
    };
    let frequency = frequency_clause(&settings.frequency);
    let range = range_clause(&settings.end);

    format!(
        "{pattern}{frequency} {range}, effective {}",
        format_long_date(settings.start_date)
    )
}

/// Long-form date used in summary text: "Thursday, August 14, 2025".
///
/// Weekday and month names are chrono's fixed English set; the ISO
/// serialization of dates (`2025-08-14`) is untouched by this.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

// ── Pattern clause ──────────────────────────────────────────────────────────

fn daily_clause(daily: &DailySettings) -> String {
    if daily.weekdays_only {
        return "Occurs every weekday".to_string();
    }
    if daily.interval == 1 {
        "Occurs every day".to_string()
    } else {
        format!("Occurs every {} days", daily.interval)
    }
}

fn weekly_clause(weekly: &WeeklySettings) -> String {
    let days_text = if weekly.days.is_empty() {
        "no days selected".to_string()
    } else {
        // Render in Sun..Sat catalog order whatever order the caller
        // supplied the set in.
        let mut days = weekly.days.clone();
        normalize_days(&mut days);
        days.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Occurs every {} on {days_text}",
        count_noun(weekly.interval, "week")
    )
}

fn monthly_clause(monthly: &MonthlySettings) -> String {
    if monthly.use_day {
        format!(
            "Occurs on day {} of every {}",
            monthly.day,
            count_noun(monthly.interval, "month")
        )
    } else {
        format!(
            "Occurs on the {} {} of every {}",
            monthly.week.label(),
            nth_weekday_text(monthly.weekday),
            count_noun(monthly.pattern_interval, "month")
        )
    }
}

fn yearly_clause(yearly: &YearlySettings) -> String {
    if yearly.use_date {
        format!("Occurs every {} {}", yearly.month.name(), yearly.day)
    } else {
        format!(
            "Occurs on the {} {} of {}",
            yearly.week.label(),
            nth_weekday_text(yearly.weekday),
            yearly.pattern_month.name()
        )
    }
}

// ── Frequency clause ────────────────────────────────────────────────────────

/// The leading space belongs to the clause so an absent clause leaves no
/// double spacing behind.
fn frequency_clause(frequency: &Frequency) -> String {
    match frequency {
        Frequency::Once { time: Some(time) } => format!(" at {time}"),
        Frequency::Once { time: None } => String::new(),
        Frequency::Multiple { count, times } => match times.as_slice() {
            [] => String::new(),
            [only] => format!(" at {only}"),
            many => {
                let joined = many
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                let count = count.unwrap_or(many.len() as u32);
                format!(" {count} times daily at {joined}")
            }
        },
        Frequency::Range {
            start: Some(start),
            end: Some(end),
        } => format!(" from {start} to {end}"),
        Frequency::Range { .. } => String::new(),
    }
}

// ── Range clause ────────────────────────────────────────────────────────────

fn range_clause(end: &EndSettings) -> String {
    match end.kind {
        EndKind::Never => "with no end date".to_string(),
        EndKind::After => format!(
            "for {} occurrence{}",
            end.occurrences,
            if end.occurrences == 1 { "" } else { "s" }
        ),
        EndKind::By => match end.end_date {
            Some(date) => format!("until {}", format_long_date(date)),
            // A By end with no date is a caller-contract edge; the clause
            // stays empty rather than failing.
            None => String::new(),
        },
    }
}

fn nth_weekday_text(target: NthWeekday) -> String {
    match target {
        NthWeekday::Day => "day".to_string(),
        NthWeekday::On(weekday) => weekday.to_string(),
    }
}

/// "week" / "2 weeks" style interval nouns; singular strictly on 1.
fn count_noun(interval: u32, noun: &str) -> String {
    if interval == 1 {
        noun.to_string()
    } else {
        format!("{interval} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{FrequencyMode, SettingsPatch, WeekPosition};
    use crate::time::{TimeOfDay, DEFAULT_END_TIME, DEFAULT_TIME};
    use chrono::{Month, Weekday};
    use proptest::prelude::*;

    /// Thursday, August 14, 2025.
    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 14).unwrap()
    }

    fn base() -> RecurrenceSettings {
        RecurrenceSettings::for_date(anchor())
    }

    fn time(label: &str) -> TimeOfDay {
        label.parse().unwrap()
    }

    // ── whole-sentence shape ────────────────────────────────────────────

    #[test]
    fn test_default_settings_summary() {
        assert_eq!(
            build_summary(&base()),
            "Occurs every day at 9:00 AM with no end date, effective Thursday, August 14, 2025"
        );
    }

    #[test]
    fn test_summary_is_pure() {
        let settings = base();
        assert_eq!(build_summary(&settings), build_summary(&settings));
    }

    #[test]
    fn test_long_date_format() {
        assert_eq!(format_long_date(anchor()), "Thursday, August 14, 2025");
        assert_eq!(
            format_long_date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()),
            "Monday, January 5, 2026"
        );
    }

    // ── daily pattern ───────────────────────────────────────────────────

    #[test]
    fn test_daily_interval_wording() {
        let mut settings = base();
        assert!(build_summary(&settings).starts_with("Occurs every day "));

        settings.daily.interval = 3;
        assert!(build_summary(&settings).starts_with("Occurs every 3 days "));
    }

    #[test]
    fn test_daily_weekday_only_ignores_interval() {
        let mut settings = base();
        settings.daily.weekdays_only = true;
        settings.daily.interval = 4;
        assert!(build_summary(&settings).starts_with("Occurs every weekday "));
    }

    // ── weekly pattern ──────────────────────────────────────────────────

    #[test]
    fn test_weekly_days_in_catalog_order() {
        let mut settings = base();
        settings.pattern = Pattern::Weekly;
        settings.weekly.interval = 2;
        settings.weekly.days = vec![Weekday::Fri, Weekday::Mon, Weekday::Wed];
        assert!(
            build_summary(&settings).starts_with("Occurs every 2 weeks on Mon, Wed, Fri ")
        );
    }

    #[test]
    fn test_weekly_empty_days_render_placeholder() {
        let mut settings = base();
        settings.pattern = Pattern::Weekly;
        settings.weekly.days.clear();
        assert!(build_summary(&settings).starts_with("Occurs every week on no days selected "));
    }

    // ── monthly pattern ─────────────────────────────────────────────────

    #[test]
    fn test_monthly_day_of_month() {
        let mut settings = base();
        settings.pattern = Pattern::Monthly;
        assert!(build_summary(&settings).starts_with("Occurs on day 14 of every month "));

        settings.monthly.interval = 2;
        assert!(build_summary(&settings).starts_with("Occurs on day 14 of every 2 months "));
    }

    #[test]
    fn test_monthly_nth_weekday() {
        let mut settings = base();
        settings.pattern = Pattern::Monthly;
        settings.monthly.use_day = false;
        settings.monthly.week = WeekPosition::Last;
        settings.monthly.weekday = NthWeekday::On(Weekday::Fri);
        assert!(build_summary(&settings).starts_with("Occurs on the last Fri of every month "));

        settings.monthly.weekday = NthWeekday::Day;
        settings.monthly.week = WeekPosition::First;
        settings.monthly.pattern_interval = 3;
        assert!(
            build_summary(&settings).starts_with("Occurs on the first day of every 3 months ")
        );
    }

    #[test]
    fn test_monthly_use_day_toggle_round_trips() {
        let mut settings = base();
        settings.pattern = Pattern::Monthly;
        settings.monthly.day = 27;

        settings.monthly.use_day = false;
        let nth_text = build_summary(&settings);
        assert!(!nth_text.contains("day 27"));

        settings.monthly.use_day = true;
        assert!(build_summary(&settings).starts_with("Occurs on day 27 "));
    }

    // ── yearly pattern ──────────────────────────────────────────────────

    #[test]
    fn test_yearly_fixed_date() {
        let mut settings = base();
        settings.pattern = Pattern::Yearly;
        assert!(build_summary(&settings).starts_with("Occurs every August 14 "));
    }

    #[test]
    fn test_yearly_nth_weekday() {
        let mut settings = base();
        settings.pattern = Pattern::Yearly;
        settings.yearly.use_date = false;
        settings.yearly.week = WeekPosition::Third;
        settings.yearly.weekday = NthWeekday::On(Weekday::Wed);
        settings.yearly.pattern_month = Month::August;
        assert!(build_summary(&settings).starts_with("Occurs on the third Wed of August "));
    }

    // ── frequency clause ────────────────────────────────────────────────

    #[test]
    fn test_once_without_time_contributes_nothing() {
        let mut settings = base();
        settings.frequency = Frequency::Once { time: None };
        assert!(build_summary(&settings).starts_with("Occurs every day with no end date"));
    }

    #[test]
    fn test_multiple_with_one_time_reads_like_once() {
        let mut settings = base();
        settings.frequency = Frequency::Multiple {
            count: Some(1),
            times: vec![time("2:30 PM")],
        };
        assert!(build_summary(&settings).contains(" at 2:30 PM with"));
        assert!(!build_summary(&settings).contains("times daily"));
    }

    #[test]
    fn test_multiple_times_lists_them_in_order() {
        let mut settings = base();
        settings.frequency = Frequency::Multiple {
            count: Some(3),
            times: vec![time("9:00 AM"), time("1:00 PM"), time("5:30 PM")],
        };
        assert!(
            build_summary(&settings).contains(" 3 times daily at 9:00 AM, 1:00 PM, 5:30 PM with")
        );
    }

    #[test]
    fn test_multiple_missing_count_falls_back_to_length() {
        let mut settings = base();
        settings.frequency = Frequency::Multiple {
            count: None,
            times: vec![time("9:00 AM"), time("5:00 PM")],
        };
        assert!(build_summary(&settings).contains(" 2 times daily at "));
    }

    #[test]
    fn test_range_needs_both_bounds() {
        let mut settings = base();
        settings.frequency = Frequency::Range {
            start: Some(DEFAULT_TIME),
            end: Some(DEFAULT_END_TIME),
        };
        assert!(build_summary(&settings).contains(" from 9:00 AM to 5:00 PM with"));

        settings.frequency = Frequency::Range {
            start: Some(DEFAULT_TIME),
            end: None,
        };
        assert!(build_summary(&settings).starts_with("Occurs every day with no end date"));
    }

    // ── range clause ────────────────────────────────────────────────────

    #[test]
    fn test_after_pluralizes_on_anything_but_one() {
        let mut settings = base();
        settings.end.kind = EndKind::After;

        settings.end.occurrences = 1;
        assert!(build_summary(&settings).contains("for 1 occurrence,"));

        settings.end.occurrences = 5;
        assert!(build_summary(&settings).contains("for 5 occurrences,"));

        settings.end.occurrences = 0;
        assert!(build_summary(&settings).contains("for 0 occurrences,"));
    }

    #[test]
    fn test_by_renders_long_form_date() {
        let mut settings = base();
        settings.end.kind = EndKind::By;
        settings.end.end_date = Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert!(build_summary(&settings).contains("until Wednesday, December 31, 2025,"));
    }

    #[test]
    fn test_by_without_date_does_not_panic() {
        let mut settings = base();
        settings.end.kind = EndKind::By;
        settings.end.end_date = None;
        let text = build_summary(&settings);
        assert!(text.contains(", effective Thursday, August 14, 2025"));
    }

    #[test]
    fn test_effective_clause_always_present() {
        for pattern in [
            Pattern::Daily,
            Pattern::Weekly,
            Pattern::Monthly,
            Pattern::Yearly,
        ] {
            let mut settings = base();
            settings.pattern = pattern;
            assert!(
                build_summary(&settings).ends_with(", effective Thursday, August 14, 2025"),
                "pattern {pattern:?}"
            );
        }
    }

    // ── totality & purity over the whole settings space ─────────────────

    fn any_time() -> impl Strategy<Value = TimeOfDay> {
        (0..TimeOfDay::COUNT).prop_map(|i| TimeOfDay::from_index(i).unwrap())
    }

    fn any_weekday() -> impl Strategy<Value = Weekday> {
        proptest::sample::select(vec![
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ])
    }

    fn any_week_position() -> impl Strategy<Value = WeekPosition> {
        proptest::sample::select(vec![
            WeekPosition::First,
            WeekPosition::Second,
            WeekPosition::Third,
            WeekPosition::Fourth,
            WeekPosition::Last,
        ])
    }

    fn any_nth_weekday() -> impl Strategy<Value = NthWeekday> {
        prop_oneof![
            Just(NthWeekday::Day),
            any_weekday().prop_map(NthWeekday::On),
        ]
    }

    fn any_month() -> impl Strategy<Value = Month> {
        (1u8..=12).prop_map(|m| Month::try_from(m).unwrap())
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1990i32..2100, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn any_frequency() -> impl Strategy<Value = Frequency> {
        prop_oneof![
            proptest::option::of(any_time()).prop_map(|time| Frequency::Once { time }),
            (
                proptest::option::of(0u32..10),
                proptest::collection::vec(any_time(), 0..5)
            )
                .prop_map(|(count, times)| Frequency::Multiple { count, times }),
            (
                proptest::option::of(any_time()),
                proptest::option::of(any_time())
            )
                .prop_map(|(start, end)| Frequency::Range { start, end }),
        ]
    }

    fn any_settings() -> impl Strategy<Value = RecurrenceSettings> {
        let pattern = proptest::sample::select(vec![
            Pattern::Daily,
            Pattern::Weekly,
            Pattern::Monthly,
            Pattern::Yearly,
        ]);
        let daily = (any::<bool>(), 0u32..60).prop_map(|(weekdays_only, interval)| {
            DailySettings {
                weekdays_only,
                interval,
            }
        });
        let weekly = (0u32..60, proptest::collection::vec(any_weekday(), 0..7)).prop_map(
            |(interval, days)| WeeklySettings { interval, days },
        );
        let monthly = (
            any::<bool>(),
            0u32..40,
            0u32..24,
            any_week_position(),
            any_nth_weekday(),
            0u32..24,
        )
            .prop_map(
                |(use_day, day, interval, week, weekday, pattern_interval)| MonthlySettings {
                    use_day,
                    day,
                    interval,
                    week,
                    weekday,
                    pattern_interval,
                },
            );
        let yearly = (
            any::<bool>(),
            any_month(),
            0u32..40,
            any_week_position(),
            any_nth_weekday(),
            any_month(),
        )
            .prop_map(
                |(use_date, month, day, week, weekday, pattern_month)| YearlySettings {
                    use_date,
                    month,
                    day,
                    week,
                    weekday,
                    pattern_month,
                },
            );
        let end = (
            proptest::sample::select(vec![EndKind::Never, EndKind::After, EndKind::By]),
            0u32..1000,
            proptest::option::of(any_date()),
        )
            .prop_map(|(kind, occurrences, end_date)| EndSettings {
                kind,
                occurrences,
                end_date,
            });

        (
            any_date(),
            pattern,
            daily,
            weekly,
            monthly,
            yearly,
            end,
            any_frequency(),
        )
            .prop_map(
                |(start_date, pattern, daily, weekly, monthly, yearly, end, frequency)| {
                    RecurrenceSettings {
                        start_date,
                        pattern,
                        daily,
                        weekly,
                        monthly,
                        yearly,
                        end,
                        frequency,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn prop_summary_is_total_and_deterministic(settings in any_settings()) {
            let first = build_summary(&settings);
            let second = build_summary(&settings);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.starts_with("Occurs "));
            prop_assert!(first.contains(", effective "));
        }

        #[test]
        fn prop_summary_ignores_inactive_pattern_records(
            settings in any_settings(),
            other_day in 1u32..28,
        ) {
            // Editing a record the active pattern does not use never moves
            // the summary.
            let mut edited = settings.clone();
            match settings.pattern {
                Pattern::Daily => edited.monthly.day = other_day,
                _ => edited.daily.interval = other_day,
            }
            prop_assert_eq!(build_summary(&settings), build_summary(&edited));
        }
    }

    #[test]
    fn test_patch_driven_update_matches_direct_edit() {
        let mut via_patch = base();
        via_patch.apply(SettingsPatch {
            pattern: Some(Pattern::Weekly),
            ..SettingsPatch::default()
        });

        let mut direct = base();
        direct.pattern = Pattern::Weekly;

        assert_eq!(build_summary(&via_patch), build_summary(&direct));
        assert_eq!(via_patch.frequency.mode(), FrequencyMode::Once);
    }
}
