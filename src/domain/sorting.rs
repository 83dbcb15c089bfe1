//! Transient display ordering for the day view.
//!
//! The canonical order of active habits is the drag order held by the
//! store and changed only through `HabitStore::reorder`. The day view
//! additionally floats unfinished habits to the top for the day being
//! rendered; that sort is recomputed per render and never written back.

use crate::domain::habit::Habit;
use chrono::NaiveDate;

/// Orders habits incomplete-first for rendering a single day.
///
/// Stable within each group: habits keep their drag order among the
/// incomplete and among the completed.
pub fn day_view_order(habits: &[Habit], date: NaiveDate) -> Vec<&Habit> {
    let (complete, incomplete): (Vec<&Habit>, Vec<&Habit>) =
        habits.iter().partition(|h| h.is_completed(date));
    incomplete.into_iter().chain(complete).collect()
}
