//! # Habito Core
//!
//! Core habit-state engine and domain models for the Habito habit tracker.
//!
//! This crate provides the fundamental types and operations for tracking
//! daily habit completions and projecting them into day, week and month
//! calendar views, without any dependency on specific UI implementations
//! or storage backends.

pub mod domain;
pub mod engine;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    calendar::{CalendarWindow, ViewMode, YearMonth},
    habit::{Habit, HabitId},
    store::HabitStore,
};
pub use engine::{Command, DirtyViews, Engine, View};
pub use error::{HabitoError, Result};
pub use storage::Storage;
