//! The fixed half-hour time catalog and its ordering helpers.
//!
//! Every time-of-day value in this crate is drawn from a closed, ordered
//! catalog of 48 half-hour slots spanning `12:00 AM` through `11:30 PM`.
//! The catalog position is the sole basis for comparing two times; there
//! is no am/pm arithmetic and no numeric time parsing anywhere. This keeps
//! "is this range valid?" and "what comes after 11:30 PM?" well-defined
//! questions with table-lookup answers.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::OstinatoError;

/// The exact catalog labels, in order. The single source of truth.
static LABELS: [&str; 48] = [
    "12:00 AM", "12:30 AM", "1:00 AM", "1:30 AM", "2:00 AM", "2:30 AM", "3:00 AM", "3:30 AM",
    "4:00 AM", "4:30 AM", "5:00 AM", "5:30 AM", "6:00 AM", "6:30 AM", "7:00 AM", "7:30 AM",
    "8:00 AM", "8:30 AM", "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "12:00 PM", "12:30 PM", "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM", "3:00 PM", "3:30 PM",
    "4:00 PM", "4:30 PM", "5:00 PM", "5:30 PM", "6:00 PM", "6:30 PM", "7:00 PM", "7:30 PM",
    "8:00 PM", "8:30 PM", "9:00 PM", "9:30 PM", "10:00 PM", "10:30 PM", "11:00 PM", "11:30 PM",
];

/// The default single-occurrence time (`9:00 AM`).
pub const DEFAULT_TIME: TimeOfDay = TimeOfDay(18);

/// The default end bound for a time range (`5:00 PM`).
pub const DEFAULT_END_TIME: TimeOfDay = TimeOfDay(34);

/// One entry of the half-hour catalog.
///
/// A `TimeOfDay` is an index into the catalog, not a parsed clock value.
/// Ordering (`Ord`), display, and serialization all go through the catalog,
/// so two values compare exactly as their labels appear in the list.
///
/// # Examples
///
/// ```
/// use ostinato::TimeOfDay;
///
/// let nine: TimeOfDay = "9:00 AM".parse().unwrap();
/// let five: TimeOfDay = "5:00 PM".parse().unwrap();
/// assert!(nine < five);
/// assert_eq!(nine.to_string(), "9:00 AM");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u8);

impl TimeOfDay {
    /// Number of catalog entries (48 half-hour slots).
    pub const COUNT: usize = 48;

    /// The first catalog entry, `12:00 AM`.
    pub const FIRST: TimeOfDay = TimeOfDay(0);

    /// The last catalog entry, `11:30 PM`.
    pub const LAST: TimeOfDay = TimeOfDay(47);

    /// Every catalog entry, in order.
    pub const ALL: [TimeOfDay; Self::COUNT] = {
        let mut all = [TimeOfDay(0); Self::COUNT];
        let mut i = 0;
        while i < Self::COUNT {
            all[i] = TimeOfDay(i as u8);
            i += 1;
        }
        all
    };

    /// Look up a catalog entry by position.
    ///
    /// # Errors
    ///
    /// Returns [`OstinatoError::InvalidTimeIndex`] if `index` is 48 or more.
    pub fn from_index(index: usize) -> crate::Result<Self> {
        if index < Self::COUNT {
            Ok(TimeOfDay(index as u8))
        } else {
            Err(OstinatoError::InvalidTimeIndex(index))
        }
    }

    /// Look up the catalog entry for a 24-hour clock reading.
    ///
    /// Only exact half-hour readings exist in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`OstinatoError::InvalidClockTime`] if `hour` is 24 or more
    /// or `minute` is neither 0 nor 30.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostinato::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_hm(9, 0).unwrap().label(), "9:00 AM");
    /// assert_eq!(TimeOfDay::from_hm(17, 0).unwrap().label(), "5:00 PM");
    /// assert!(TimeOfDay::from_hm(9, 15).is_err());
    /// ```
    pub fn from_hm(hour: u32, minute: u32) -> crate::Result<Self> {
        if hour >= 24 || (minute != 0 && minute != 30) {
            return Err(OstinatoError::InvalidClockTime { hour, minute });
        }
        Ok(TimeOfDay((hour * 2 + minute / 30) as u8))
    }

    /// This entry's position in the catalog (0..=47).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The literal catalog label, e.g. `"9:30 PM"`.
    pub fn label(self) -> &'static str {
        LABELS[self.0 as usize]
    }

    /// Hour on the 24-hour clock (0..=23).
    pub fn hour(self) -> u32 {
        u32::from(self.0) / 2
    }

    /// Minute within the hour: 0 or 30.
    pub fn minute(self) -> u32 {
        (u32::from(self.0) % 2) * 30
    }

    /// The next catalog entry, wrapping past the end.
    ///
    /// Used when adding a new time slot: the proposed default is the slot
    /// after the latest one already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostinato::TimeOfDay;
    ///
    /// let last: TimeOfDay = "11:30 PM".parse().unwrap();
    /// assert_eq!(last.next_wrapping().label(), "12:00 AM");
    /// ```
    pub fn next_wrapping(self) -> Self {
        TimeOfDay((self.0 + 1) % Self::COUNT as u8)
    }

    /// The next catalog entry, clamped at `11:30 PM`.
    ///
    /// Used to auto-correct the end of a time range when its start moves
    /// past it: the corrected end is `min(start + 1, last)`.
    pub fn saturating_next(self) -> Self {
        TimeOfDay((self.0 + 1).min(Self::COUNT as u8 - 1))
    }
}

/// Whether `start`..`end` is a valid same-day range.
///
/// True iff `end` comes strictly after `start` in the catalog; overnight
/// wraparound ranges are not permitted.
///
/// # Examples
///
/// ```
/// use ostinato::{validate_time_range, TimeOfDay};
///
/// let nine: TimeOfDay = "9:00 AM".parse().unwrap();
/// let five: TimeOfDay = "5:00 PM".parse().unwrap();
/// assert!(validate_time_range(nine, five));
/// assert!(!validate_time_range(five, nine));
/// assert!(!validate_time_range(nine, nine));
/// ```
pub fn validate_time_range(start: TimeOfDay, end: TimeOfDay) -> bool {
    end.index() > start.index()
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeOfDay {
    type Err = OstinatoError;

    /// Parses an exact catalog label; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LABELS
            .iter()
            .position(|label| *label == s)
            .map(|i| TimeOfDay(i as u8))
            .ok_or_else(|| OstinatoError::UnknownTime(s.to_string()))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TimeVisitor;

        impl Visitor<'_> for TimeVisitor {
            type Value = TimeOfDay;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a half-hour time label such as \"9:00 AM\"")
            }

            fn visit_str<E>(self, v: &str) -> Result<TimeOfDay, E>
            where
                E: de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TimeVisitor)
    }
}
