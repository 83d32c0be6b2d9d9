use std::path::Path;

use crate::error::Result;
use crate::model::Task;

/// Export tasks to a semicolon-delimited CSV file matching the import
/// format.
///
/// Columns: Título ; Fecha límite ; Estado ; Prioridad ; Horas estimadas
/// Dates are formatted as YYYY-MM-DD. Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(["Título", "Fecha límite", "Estado", "Prioridad", "Horas estimadas"])?;

    for task in tasks {
        let hours = task
            .estimated_hours
            .map(|h| h.to_string())
            .unwrap_or_default();
        wtr.write_record([
            task.title.as_str(),
            &task.due_date.format("%Y-%m-%d").to_string(),
            task.status.label(),
            task.priority.label(),
            &hours,
        ])?;
    }

    wtr.flush()?;
    Ok(tasks.len())
}
