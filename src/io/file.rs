use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::store::TaskStore;

/// Save a store snapshot to a JSON file.
pub fn save_store(store: &TaskStore, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a store snapshot from a JSON file.
pub fn load_store(path: &Path) -> Result<TaskStore> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Default snapshot location under the platform data directory.
pub fn default_store_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "gantt-engine")
        .map(|dirs| dirs.data_dir().join("store.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, Task, User};
    use chrono::NaiveDate;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = TaskStore::new();
        let uid = store.create_user(User::new("Ana", Role::Administrador));
        let mut task = Task::new("Maquetar", NaiveDate::from_ymd_opt(2025, 9, 10).unwrap());
        task.assigned_users = vec![uid];
        let tid = store.create_task(task);

        save_store(&store, &path).unwrap();
        let loaded = load_store(&path).unwrap();
        assert_eq!(loaded.tasks().len(), 1);
        assert_eq!(loaded.task(tid).unwrap().assigned_users, vec![uid]);
        assert_eq!(loaded.user(uid).unwrap().name, "Ana");
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_store(&dir.path().join("nope.json")).is_err());
    }
}
