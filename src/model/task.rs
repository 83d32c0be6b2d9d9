use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, Result};

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pendiente,
    #[serde(rename = "En progreso")]
    EnProgreso,
    Completada,
    Cancelada,
}

impl TaskStatus {
    /// Match a free-form status string from imports (Spanish or English).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" | "pending" | "not started" | "not-started" | "new" => {
                Some(TaskStatus::Pendiente)
            }
            "en progreso" | "en-progreso" | "in progress" | "in-progress" | "active"
            | "started" => Some(TaskStatus::EnProgreso),
            "completada" | "completed" | "complete" | "done" | "finished" => {
                Some(TaskStatus::Completada)
            }
            "cancelada" | "cancelled" | "canceled" => Some(TaskStatus::Cancelada),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pendiente => "Pendiente",
            TaskStatus::EnProgreso => "En progreso",
            TaskStatus::Completada => "Completada",
            TaskStatus::Cancelada => "Cancelada",
        }
    }
}

/// Task priority. Doubles as the duration heuristic when no hour
/// estimate exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskPriority {
    Baja,
    #[default]
    Media,
    Alta,
    #[serde(rename = "Crítica", alias = "Urgente")]
    Critica,
}

impl TaskPriority {
    /// Rank for priority-descending sort (Crítica=4 > Alta=3 > Media=2 > Baja=1).
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::Baja => 1,
            TaskPriority::Media => 2,
            TaskPriority::Alta => 3,
            TaskPriority::Critica => 4,
        }
    }

    /// Default bar duration in days when the task has no hour estimate.
    pub fn default_duration_days(&self) -> i64 {
        match self {
            TaskPriority::Baja => 2,
            TaskPriority::Media => 3,
            TaskPriority::Alta => 4,
            TaskPriority::Critica => 5,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "baja" | "low" => Some(TaskPriority::Baja),
            "media" | "medium" | "med" | "normal" => Some(TaskPriority::Media),
            "alta" | "high" => Some(TaskPriority::Alta),
            "crítica" | "critica" | "critical" | "urgente" | "urgent" => {
                Some(TaskPriority::Critica)
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Baja => "Baja",
            TaskPriority::Media => "Media",
            TaskPriority::Alta => "Alta",
            TaskPriority::Critica => "Crítica",
        }
    }
}

/// A single task in the dashboard.
///
/// Owned by the store; the engine only reads it. Progress is not stored
/// here — it is derived per render by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub project_id: Option<Uuid>,
    pub assigned_users: Vec<Uuid>,
    pub estimated_hours: Option<f32>,
    pub tags: Vec<String>,
}

impl Task {
    /// Create a new task with sensible defaults.
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Pendiente,
            priority: TaskPriority::Media,
            due_date,
            project_id: None,
            assigned_users: Vec::new(),
            estimated_hours: None,
            tags: Vec::new(),
        }
    }

    /// Bar duration in days: explicit estimate wins (8h workdays, rounded
    /// up, minimum one day), otherwise the priority table.
    pub fn duration_days(&self) -> i64 {
        match self.estimated_hours {
            Some(h) if h.is_finite() && h > 0.0 => ((h / 8.0).ceil() as i64).max(1),
            _ => self.priority.default_duration_days(),
        }
    }
}

/// Try parsing a date string with several common formats.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Raw string-field task input as it arrives from a form.
///
/// This is the validation boundary: dates and numeric amounts are parsed
/// here and rejected with a field-level error, never forwarded to the
/// layout math as invalid values.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: String,
    /// Empty string means "no estimate".
    pub estimated_hours: String,
    pub project_id: Option<Uuid>,
    pub assigned_users: Vec<Uuid>,
    pub tags: Vec<String>,
}

impl TaskDraft {
    /// Validate the draft into a `Task`.
    pub fn build(&self) -> Result<Task> {
        let due_date = parse_date(&self.due_date)
            .ok_or_else(|| EngineError::InvalidDate(self.due_date.clone()))?;

        let estimated_hours = match self.estimated_hours.trim() {
            "" => None,
            s => {
                let h: f32 = s
                    .parse()
                    .map_err(|_| EngineError::InvalidAmount(s.to_string(), "estimated_hours"))?;
                if !h.is_finite() || h < 0.0 {
                    return Err(EngineError::InvalidAmount(s.to_string(), "estimated_hours"));
                }
                Some(h)
            }
        };

        let title = if self.title.trim().is_empty() {
            "Nueva tarea".to_string()
        } else {
            self.title.trim().to_string()
        };

        let mut assigned = self.assigned_users.clone();
        assigned.dedup();

        Ok(Task {
            id: Uuid::new_v4(),
            title,
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            due_date,
            project_id: self.project_id,
            assigned_users: assigned,
            estimated_hours,
            tags: self.tags.clone(),
        })
    }
}
