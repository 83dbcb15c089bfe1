//! Pure calendar-window math for the day, week and month views.
//!
//! Nothing in this module touches the store or performs I/O. The one
//! deliberate exception to purity is [`logical_today`], the single place
//! the crate reads the clock: callers compute the logical day once per
//! session and thread it explicitly into every projection that needs a
//! day key, so all views agree on what "today" means.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Display mode a window was projected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// Fixed Monday-through-Sunday calendar week.
    Weekly,
    /// The last seven days ending on the logical current day.
    Rolling,
    /// A full calendar month, Monday-first grid.
    Monthly,
}

/// A calendar month, 1-based like chrono.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Creates a year/month pair. Returns `None` unless `month` is 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The previous month, rolling the year back across January.
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next month, rolling the year forward across December.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The first day of the month.
    pub fn first_day(self) -> NaiveDate {
        // month is validated at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month in 1..=12")
    }
}

/// The date range one view renders, derived on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarWindow {
    pub mode: ViewMode,
    /// Consecutive ISO dates covered by the window.
    pub dates: Vec<NaiveDate>,
    /// Empty grid cells before day 1 in a Monday-first month grid.
    /// Always 0 for weekly and rolling windows.
    pub leading_blanks: usize,
}

impl CalendarWindow {
    /// The Monday-through-Sunday week containing `reference`.
    pub fn weekly(reference: NaiveDate) -> Self {
        Self {
            mode: ViewMode::Weekly,
            dates: week_window(reference),
            leading_blanks: 0,
        }
    }

    /// The seven days ending on `today`.
    ///
    /// Takes the logical current day, not a navigated reference: switching
    /// between weekly and rolling modes re-anchors to the current instant
    /// rather than to whatever window was displayed before.
    pub fn rolling(today: NaiveDate) -> Self {
        Self {
            mode: ViewMode::Rolling,
            dates: rolling_window(today),
            leading_blanks: 0,
        }
    }

    /// Every day of the given month, plus the grid alignment offset.
    pub fn monthly(ym: YearMonth) -> Self {
        let (dates, leading_blanks) = month_window(ym);
        Self {
            mode: ViewMode::Monthly,
            dates,
            leading_blanks,
        }
    }
}

/// The calendar date the running session considers "today".
///
/// The local calendar date, read once per session by the application root
/// and passed down explicitly; no other code in the crate consults the
/// clock, so a completion toggled in one view can never land on a
/// different day in another.
pub fn logical_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The Monday of the week containing `reference`.
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    reference - Duration::days(i64::from(reference.weekday().num_days_from_monday()))
}

/// Seven consecutive dates, Monday through Sunday, containing `reference`.
pub fn week_window(reference: NaiveDate) -> Vec<NaiveDate> {
    let monday = week_start(reference);
    (0..7).map(|offset| monday + Duration::days(offset)).collect()
}

/// The seven dates `today - 6 ..= today`.
pub fn rolling_window(today: NaiveDate) -> Vec<NaiveDate> {
    (0..7)
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect()
}

/// Every date of the month plus the number of leading blank cells a
/// Monday-first grid needs before day 1.
pub fn month_window(ym: YearMonth) -> (Vec<NaiveDate>, usize) {
    let first = ym.first_day();
    let dates: Vec<NaiveDate> = first
        .iter_days()
        .take_while(|d| d.month() == ym.month)
        .collect();
    let leading_blanks = first.weekday().num_days_from_monday() as usize;
    (dates, leading_blanks)
}

/// Shifts a weekly reference date back one week.
pub fn prev_week(reference: NaiveDate) -> NaiveDate {
    reference - Duration::days(7)
}

/// Shifts a weekly reference date forward one week.
pub fn next_week(reference: NaiveDate) -> NaiveDate {
    reference + Duration::days(7)
}
