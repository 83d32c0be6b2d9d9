//! The timeline engine: view state plus snapshot recomputation.
//!
//! A snapshot is always recomputed against the store's current contents.
//! The engine never keeps its own copy of the task collection, so a
//! notification handled late still sees the latest data.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::bus::TaskEvent;
use crate::layout::{compute_bar, today_marker, BarLayout};
use crate::model::{compute_window, DateWindow, TimelineScale};
use crate::pipeline::{run_pipeline, EnrichedTask, GroupKey, SortKey, TaskFilters, Viewer};
use crate::store::TaskStore;

/// One task with its computed bar, ready for the rendering layer.
///
/// `bar` is `None` for tasks outside the visible window; the renderer
/// skips those rows' bars instead of drawing a degenerate one.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub task: EnrichedTask,
    pub bar: Option<BarLayout>,
}

#[derive(Debug, Clone)]
pub struct GroupLayout {
    pub label: String,
    pub rows: Vec<TaskRow>,
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub window: DateWindow,
    /// Percentage offset of today's line, `None` when out of view.
    pub today: Option<f64>,
    pub groups: Vec<GroupLayout>,
}

impl ViewSnapshot {
    /// Total number of rows across all groups.
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}

/// View state for one dashboard timeline.
pub struct TimelineEngine {
    pub viewer: Viewer,
    pub scale: TimelineScale,
    /// Date the window centers on when no tasks pin it.
    pub reference: NaiveDate,
    pub filters: TaskFilters,
    pub sort: SortKey,
    pub group: GroupKey,
}

impl TimelineEngine {
    pub fn new(viewer: Viewer) -> Self {
        Self {
            viewer,
            scale: TimelineScale::Days,
            reference: chrono::Local::now().date_naive(),
            filters: TaskFilters::default(),
            sort: SortKey::default(),
            group: GroupKey::default(),
        }
    }

    /// Pin the view to a single project (or unpin with `None`). While
    /// pinned, bus events for other projects are ignored.
    pub fn scope_to_project(&mut self, project_id: Option<Uuid>) {
        self.filters.project = project_id;
    }

    /// Scroll the reference date.
    pub fn navigate_days(&mut self, days: i64) {
        self.reference += chrono::Duration::days(days);
    }

    pub fn set_scale(&mut self, scale: TimelineScale) {
        self.scale = scale;
    }

    /// Recompute the whole view against the store's current contents,
    /// using the wall clock for the today marker.
    pub fn snapshot(&self, store: &TaskStore) -> ViewSnapshot {
        self.snapshot_at(store, chrono::Local::now().date_naive())
    }

    /// [`TimelineEngine::snapshot`] with an explicit "today".
    pub fn snapshot_at(&self, store: &TaskStore, today: NaiveDate) -> ViewSnapshot {
        let groups = run_pipeline(
            store.tasks(),
            store.users(),
            store.projects(),
            self.viewer,
            &self.filters,
            self.sort,
            self.group,
        );

        let due_dates: Vec<NaiveDate> = groups
            .iter()
            .flat_map(|g| g.tasks.iter().map(|e| e.task.due_date))
            .collect();
        let window = compute_window(self.reference, self.scale, &due_dates);

        let groups = groups
            .into_iter()
            .map(|g| GroupLayout {
                label: g.label,
                rows: g
                    .tasks
                    .into_iter()
                    .map(|task| TaskRow {
                        bar: compute_bar(&task.task, &window),
                        task,
                    })
                    .collect(),
            })
            .collect();

        debug!(
            start = %window.start,
            end = %window.end,
            "recomputed timeline snapshot"
        );

        ViewSnapshot {
            window,
            today: today_marker(&window, today),
            groups,
        }
    }

    /// React to a task mutation notification.
    ///
    /// Returns the recomputed snapshot, or `None` when the event concerns
    /// a project this view is not pinned to. The recomputation re-fetches
    /// from the store, so a stale payload (e.g. a delete for a task the
    /// handler still remembers) cannot resurrect old data.
    pub fn handle_event(&self, event: &TaskEvent, store: &TaskStore) -> Option<ViewSnapshot> {
        if let Some(scope) = self.filters.project {
            if event.project_id != Some(scope) {
                debug!(task = %event.task_id, "ignoring event outside project scope");
                return None;
            }
        }
        Some(self.snapshot(store))
    }
}
