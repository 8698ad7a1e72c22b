//! Editable list of intra-day time slots.
//!
//! When a rule fires several times per day, each firing time is edited as a
//! slot with a stable identity. Identity is what keeps an edit attached to
//! the row the user touched: the list re-sorts chronologically after every
//! change, so positional indexes move around while [`SlotId`]s do not.

use uuid::Uuid;

use crate::time::{TimeOfDay, DEFAULT_TIME};

/// Capacity used when the caller does not choose one.
pub const DEFAULT_MAX_SLOTS: usize = 3;

/// Stable identity of one slot, independent of its position or time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(Uuid);

impl SlotId {
    fn fresh() -> Self {
        SlotId(Uuid::new_v4())
    }
}

/// One firing time with its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: SlotId,
    pub time: TimeOfDay,
}

/// The slot list plus its capacity rules.
///
/// Invariants held across every operation:
/// - the list is never empty (removal refuses to take the last slot);
/// - the list stays chronologically sorted after any edit, with ties
///   keeping their relative order;
/// - [`SlotId`]s survive re-sorting.
///
/// # Examples
///
/// ```
/// use ostinato::{TimeSlots, DEFAULT_MAX_SLOTS};
///
/// let mut slots = TimeSlots::new(&[], DEFAULT_MAX_SLOTS);
/// assert_eq!(slots.times().len(), 1); // seeded with 9:00 AM
///
/// let added = slots.add().unwrap();
/// slots.set_time(added, "7:00 AM".parse().unwrap());
/// assert_eq!(slots.slots()[0].id, added); // re-sorted to the front
/// ```
#[derive(Debug, Clone)]
pub struct TimeSlots {
    slots: Vec<TimeSlot>,
    max_slots: usize,
}

impl TimeSlots {
    /// Builds a list from existing times, minting a fresh id per entry.
    ///
    /// An empty `times` seeds one slot at 9:00 AM so the editor never
    /// starts blank. The initial order is kept as given; sorting kicks in
    /// on the first edit.
    pub fn new(times: &[TimeOfDay], max_slots: usize) -> Self {
        let slots = if times.is_empty() {
            vec![TimeSlot {
                id: SlotId::fresh(),
                time: DEFAULT_TIME,
            }]
        } else {
            times
                .iter()
                .map(|&time| TimeSlot {
                    id: SlotId::fresh(),
                    time,
                })
                .collect()
        };
        TimeSlots { slots, max_slots }
    }

    /// Appends a slot at the cyclic successor of the last slot's time.
    ///
    /// Returns the new slot's id, or `None` when the list is already at
    /// capacity.
    pub fn add(&mut self) -> Option<SlotId> {
        if self.slots.len() >= self.max_slots {
            return None;
        }
        let last = self.slots.last().map(|slot| slot.time).unwrap_or(DEFAULT_TIME);
        let id = SlotId::fresh();
        self.slots.push(TimeSlot {
            id,
            time: last.next_wrapping(),
        });
        Some(id)
    }

    /// Removes the slot with `id`. Refused (returns `false`) when `id` is
    /// unknown or the slot is the only one left.
    pub fn remove(&mut self, id: SlotId) -> bool {
        if self.slots.len() <= 1 {
            return false;
        }
        match self.slots.iter().position(|slot| slot.id == id) {
            Some(index) => {
                self.slots.remove(index);
                true
            }
            None => false,
        }
    }

    /// Re-times the slot with `id`, then re-sorts the list chronologically.
    ///
    /// The sort is stable, so a slot set to a time another slot already
    /// holds lands after it. Returns `false` when `id` is unknown.
    pub fn set_time(&mut self, id: SlotId, time: TimeOfDay) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) else {
            return false;
        };
        slot.time = time;
        self.slots.sort_by_key(|slot| slot.time);
        true
    }

    /// Slots in current order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Times only, in current order.
    pub fn times(&self) -> Vec<TimeOfDay> {
        self.slots.iter().map(|slot| slot.time).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether [`add`](Self::add) would currently succeed.
    pub fn can_add_more(&self) -> bool {
        self.slots.len() < self.max_slots
    }

    /// Whether [`remove`](Self::remove) could currently succeed.
    pub fn can_remove(&self) -> bool {
        self.slots.len() > 1
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }
}

impl Default for TimeSlots {
    fn default() -> Self {
        TimeSlots::new(&[], DEFAULT_MAX_SLOTS)
    }
}
