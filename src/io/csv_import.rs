use std::path::Path;

use tracing::warn;

use crate::error::{EngineError, Result};
use crate::model::task::parse_date;
use crate::model::{Task, TaskPriority, TaskStatus};

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Map a normalized header to our column index:
///   0 = title, 1 = due date, 2 = status, 3 = priority,
///   4 = description, 5 = estimated hours, 6 = tags
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "title" | "titulo" | "título" | "task" | "tarea" | "name" | "nombre" | "label" => Some(0),

        "due" | "duedate" | "fechalimite" | "fechalímite" | "fecha" | "vencimiento"
        | "deadline" | "end" | "enddate" => Some(1),

        "status" | "estado" | "state" => Some(2),

        "priority" | "prioridad" | "pri" => Some(3),

        "description" | "descripcion" | "descripción" | "notes" | "notas" | "details" => Some(4),

        "hours" | "horas" | "estimatedhours" | "horasestimadas" | "estimate" => Some(5),

        "tags" | "etiquetas" => Some(6),

        _ => None,
    }
}

/// Import tasks from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column
/// headers flexibly in Spanish or English. Rows with a missing title or
/// an unparseable due date are skipped with a warning, never imported
/// half-formed. Returns `(tasks, skipped_count)`.
pub fn import_csv(path: &Path) -> Result<(Vec<Task>, usize)> {
    let content = std::fs::read_to_string(path)?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has_title = col_map.iter().any(|c| *c == Some(0));
    let has_due = col_map.iter().any(|c| *c == Some(1));
    if !has_title || !has_due {
        return Err(EngineError::MissingColumns(
            headers.iter().map(|h| h.to_string()).collect(),
        ));
    }

    let mut tasks: Vec<Task> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row = i + 2, error = %e, "skipping malformed CSV row");
                skipped += 1;
                continue;
            }
        };

        let mut fields: [Option<&str>; 7] = [None; 7];
        for (col_idx, field) in record.iter().enumerate() {
            if let Some(Some(slot)) = col_map.get(col_idx) {
                fields[*slot] = Some(field.trim());
            }
        }

        let title = match fields[0] {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                skipped += 1;
                continue;
            }
        };

        let due_date = match fields[1].and_then(parse_date) {
            Some(d) => d,
            None => {
                warn!(
                    row = i + 2,
                    value = fields[1].unwrap_or(""),
                    "skipping row with invalid due date"
                );
                skipped += 1;
                continue;
            }
        };

        let mut task = Task::new(title, due_date);
        task.status = fields[2].and_then(TaskStatus::parse).unwrap_or_default();
        task.priority = fields[3].and_then(TaskPriority::parse).unwrap_or_default();
        task.description = fields[4].unwrap_or("").to_string();
        task.estimated_hours = fields[5]
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|h| h.is_finite() && *h > 0.0);
        task.tags = fields[6]
            .map(|s| {
                s.split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        tasks.push(task);
    }

    if tasks.is_empty() {
        return Err(EngineError::EmptyImport { skipped });
    }

    Ok((tasks, skipped))
}
