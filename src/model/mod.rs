pub mod project;
pub mod task;
pub mod timeline;
pub mod user;

pub use project::Project;
pub use task::{Task, TaskDraft, TaskPriority, TaskStatus};
pub use timeline::{compute_window, DateWindow, TimelineScale, MAX_WINDOW_DAYS};
pub use user::{Role, User};
