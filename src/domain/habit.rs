use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

/// Unique identifier for a habit, issued from the store's counter.
///
/// Ids are never reused: the counter only moves forward, even across
/// trash/restore cycles and permanent deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(u32);

impl HabitId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tracked habit and its completion history.
///
/// `completed_dates` is a set of calendar days, so a day can never be
/// recorded twice; the on-disk key keeps the original `datesCompleted`
/// spelling so legacy records parse unchanged (duplicates in old arrays
/// collapse on load).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    #[serde(rename = "datesCompleted", default)]
    pub completed_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub trashed: bool,
}

impl Habit {
    /// Creates a new habit with no completions recorded.
    pub fn new(id: HabitId, name: String) -> Self {
        Self {
            id,
            name,
            completed_dates: BTreeSet::new(),
            trashed: false,
        }
    }

    /// Flips membership of `date` in the completion set.
    ///
    /// Returns whether the habit is completed on `date` after the flip.
    /// Applying the same date twice restores the original membership.
    pub fn toggle_completion(&mut self, date: NaiveDate) -> bool {
        if self.completed_dates.remove(&date) {
            false
        } else {
            self.completed_dates.insert(date);
            true
        }
    }

    /// Whether the habit was marked done on `date`.
    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Lifetime number of recorded completion days.
    pub fn completion_count(&self) -> usize {
        self.completed_dates.len()
    }
}
