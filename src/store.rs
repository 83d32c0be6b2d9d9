//! In-memory task store: the single owner of task, project, and user
//! records.
//!
//! Collections keep insertion order so views are deterministic. There is
//! no transactionality; an update or delete of a missing id fails with
//! `NotFound` and leaves the store untouched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::model::{Project, Task, User};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskStore {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    users: Vec<User>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Read access ---

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    // --- Task CRUD ---

    /// Insert a task and return its id.
    pub fn create_task(&mut self, task: Task) -> Uuid {
        let id = task.id;
        self.tasks.push(task);
        id
    }

    /// Apply `patch` to the task with the given id. The closure runs only
    /// when the task exists, so a miss never leaves a partial mutation.
    pub fn update_task(&mut self, id: Uuid, patch: impl FnOnce(&mut Task)) -> Result<()> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                patch(task);
                Ok(())
            }
            None => Err(EngineError::NotFound {
                kind: "task",
                id: id.to_string(),
            }),
        }
    }

    /// Remove and return the task with the given id.
    pub fn delete_task(&mut self, id: Uuid) -> Result<Task> {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(pos) => Ok(self.tasks.remove(pos)),
            None => Err(EngineError::NotFound {
                kind: "task",
                id: id.to_string(),
            }),
        }
    }

    // --- Reference data ---

    pub fn create_project(&mut self, project: Project) -> Uuid {
        let id = project.id;
        self.projects.push(project);
        id
    }

    pub fn create_user(&mut self, user: User) -> Uuid {
        let id = user.id;
        self.users.push(user);
        id
    }

    pub fn delete_project(&mut self, id: Uuid) -> Result<Project> {
        match self.projects.iter().position(|p| p.id == id) {
            Some(pos) => Ok(self.projects.remove(pos)),
            None => Err(EngineError::NotFound {
                kind: "project",
                id: id.to_string(),
            }),
        }
    }

    // --- Domain queries ---

    pub fn tasks_by_user(&self, user_id: Uuid) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.assigned_users.contains(&user_id))
            .collect()
    }

    pub fn tasks_by_project(&self, project_id: Uuid) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.project_id == Some(project_id))
            .collect()
    }

    pub fn projects_by_coordinator(&self, user_id: Uuid) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.coordinator_id == user_id)
            .collect()
    }
}
