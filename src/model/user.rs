use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of dashboard roles.
///
/// Role scoping in the pipeline matches on this exhaustively, so adding a
/// role is a compile error until every scoping site handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Administrador,
    Coordinador,
    Participante,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Administrador => "Administrador",
            Role::Coordinador => "Coordinador",
            Role::Participante => "Participante",
        }
    }
}

/// A dashboard user. Read-only reference data for assignment display and
/// role-based filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
        }
    }
}
