use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Controls what scale the timeline displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineScale {
    Days,
    Weeks,
    Months,
}

/// Hard cap on the visible span, to bound horizontal layout cost.
pub const MAX_WINDOW_DAYS: i64 = 30;

/// The visible date range of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// The leftmost visible date.
    pub start: NaiveDate,
    /// The rightmost visible date.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Build a window, swapping the bounds if given in reverse.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Total day count, inclusive of both endpoints.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Scroll the window by a number of days (negative scrolls left).
    pub fn shift_days(&mut self, days: i64) {
        self.start += Duration::days(days);
        self.end += Duration::days(days);
    }
}

/// Compute the visible window for a reference date, scale, and the due
/// dates of the tasks on screen.
///
/// With no due dates the window defaults around the reference date. With
/// due dates, the min/max span is widened by a small margin, or centered
/// and clamped to [`MAX_WINDOW_DAYS`] when the tasks spread too far.
/// Pure and idempotent for fixed inputs.
pub fn compute_window(
    reference: NaiveDate,
    scale: TimelineScale,
    due_dates: &[NaiveDate],
) -> DateWindow {
    let (Some(&min), Some(&max)) = (due_dates.iter().min(), due_dates.iter().max()) else {
        return match scale {
            TimelineScale::Days => DateWindow::new(
                reference - Duration::days(7),
                reference + Duration::days(14),
            ),
            TimelineScale::Weeks => DateWindow::new(
                reference - Duration::days(14),
                reference + Duration::days(28),
            ),
            TimelineScale::Months => {
                DateWindow::new(reference - Months::new(1), reference + Months::new(2))
            }
        };
    };

    let span = (max - min).num_days();
    if span <= 14 {
        DateWindow::new(min - Duration::days(2), max + Duration::days(2))
    } else if span <= 30 {
        DateWindow::new(min - Duration::days(5), max + Duration::days(5))
    } else {
        let midpoint = min + Duration::days(span / 2);
        DateWindow::new(
            midpoint - Duration::days(MAX_WINDOW_DAYS / 2),
            midpoint + Duration::days(MAX_WINDOW_DAYS / 2),
        )
    }
}
