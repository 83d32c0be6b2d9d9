//! Horizontal bar layout: maps task due dates into percentage positions
//! within the visible window.

use chrono::NaiveDate;

use crate::model::{DateWindow, Task};

/// Minimum bar width in percent, so short tasks stay visible.
const MIN_BAR_WIDTH_PCT: f64 = 1.0;

/// Horizontal placement of a task bar, in percent of the window width.
///
/// Invariant: `0 <= left` and `left + width <= 100`. Out-of-window tasks
/// never produce a layout; [`compute_bar`] returns `None` for them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub left: f64,
    pub width: f64,
}

/// Compute the bar placement for a task inside the window.
///
/// The bar starts on the due date and extends for the task's duration
/// ([`Task::duration_days`]). Returns `None` when the due date is outside
/// the window; callers skip rendering instead of drawing a degenerate bar.
pub fn compute_bar(task: &Task, window: &DateWindow) -> Option<BarLayout> {
    if !window.contains(task.due_date) {
        return None;
    }

    let total = window.total_days() as f64;
    let days_from_start = (task.due_date - window.start).num_days() as f64;

    let left = (days_from_start / total * 100.0).clamp(0.0, 100.0);
    let width = (task.duration_days() as f64 / total * 100.0)
        .max(MIN_BAR_WIDTH_PCT)
        .min(100.0 - left);

    Some(BarLayout { left, width })
}

/// Percentage offset of `today` within the window, `None` if out of range.
pub fn today_marker(window: &DateWindow, today: NaiveDate) -> Option<f64> {
    if !window.contains(today) {
        return None;
    }
    let days = (today - window.start).num_days() as f64;
    Some(days / window.total_days() as f64 * 100.0)
}

/// [`today_marker`] against the wall clock.
pub fn today_marker_now(window: &DateWindow) -> Option<f64> {
    today_marker(window, chrono::Local::now().date_naive())
}
