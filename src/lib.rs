//! Timeline window and bar layout engine for a Gantt project dashboard.
//!
//! The engine turns task records into a renderable view: a visible date
//! window, per-task bar positions, a today marker, and tasks enriched
//! with reference data then filtered, sorted, and grouped. All layout
//! math is pure; the only mutable state lives in the [`store::TaskStore`]
//! and the view settings on [`engine::TimelineEngine`].
//!
//! ```
//! use gantt_engine::engine::TimelineEngine;
//! use gantt_engine::model::{Role, Task, User};
//! use gantt_engine::pipeline::Viewer;
//! use gantt_engine::store::TaskStore;
//!
//! let mut store = TaskStore::new();
//! let admin = store.create_user(User::new("Ana", Role::Administrador));
//! let due = chrono::NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
//! store.create_task(Task::new("Maquetar inicio", due));
//!
//! let engine = TimelineEngine::new(Viewer { user_id: admin, role: Role::Administrador });
//! let snapshot = engine.snapshot(&store);
//! assert_eq!(snapshot.row_count(), 1);
//! ```

pub mod bus;
pub mod engine;
pub mod error;
pub mod io;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod store;

pub use bus::{EventBus, HandlerId, TaskEvent, TaskEventKind};
pub use engine::{TimelineEngine, ViewSnapshot};
pub use error::{EngineError, Result};
pub use layout::{compute_bar, today_marker, BarLayout};
pub use model::{
    compute_window, DateWindow, Project, Role, Task, TaskDraft, TaskPriority, TaskStatus,
    TimelineScale, User,
};
pub use pipeline::{run_pipeline, GroupKey, SortKey, TaskFilters, Viewer};
pub use store::TaskStore;
