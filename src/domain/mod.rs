pub mod calendar;
pub mod habit;
pub mod sorting;
pub mod store;

pub use calendar::{CalendarWindow, ViewMode, YearMonth};
pub use habit::{Habit, HabitId};
pub use sorting::day_view_order;
pub use store::HabitStore;
