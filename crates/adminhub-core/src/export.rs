//! Table export
//!
//! CSV is produced from any sequence of uniform serializable rows. PDF is
//! listed as an option but not produced yet.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{Error, Result};

/// Export target format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("CSV"),
            Self::Pdf => f.write_str("PDF"),
        }
    }
}

/// What an export produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// A file was written
    Written { path: PathBuf, rows: usize },
    /// The format is not available yet
    ComingSoon(ExportFormat),
}

/// Which table an export comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportTarget {
    Clients,
    Reports,
}

impl ExportTarget {
    /// File name of the export, without extension
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Reports => "reports",
        }
    }
}

/// Render rows as CSV.
///
/// The header is the field list of the first row, in declaration order.
/// Every value is double-quoted; embedded quotes are doubled and null or
/// missing fields are left empty. No rows means an empty payload.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let objects = rows
        .iter()
        .map(|row| match serde_json::to_value(row)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::internal(format!("cannot export non-record value {other}"))),
        })
        .collect::<Result<Vec<Map<String, Value>>>>()?;

    let Some(first) = objects.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(objects.len() + 1);
    lines.push(headers.iter().map(|h| h.as_str()).collect::<Vec<_>>().join(","));

    for object in &objects {
        let line = headers
            .iter()
            .map(|header| quote(object.get(header.as_str())))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

fn quote(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Writes export payloads into a directory
#[derive(Debug, Clone)]
pub struct Exporter {
    directory: PathBuf,
}

impl Exporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Export `rows` in `format` to `<filename>.<ext>`
    pub fn export<T: Serialize>(
        &self,
        rows: &[T],
        filename: &str,
        format: ExportFormat,
    ) -> Result<ExportOutcome> {
        match format {
            ExportFormat::Csv => {
                let payload = to_csv(rows)?;
                let path = self.write(&format!("{filename}.csv"), &payload)?;
                Ok(ExportOutcome::Written { path, rows: rows.len() })
            }
            ExportFormat::Pdf => Ok(ExportOutcome::ComingSoon(ExportFormat::Pdf)),
        }
    }

    fn write(&self, file_name: &str, payload: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(file_name);
        std::fs::write(&path, payload)?;
        info!(path = %path.display(), bytes = payload.len(), "Export written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{seed_clients, seed_reports, ClientRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clients_csv() {
        let clients = seed_clients();
        let csv = to_csv(&clients[..2]).unwrap();
        assert_eq!(
            csv,
            "id,name,email,status,joinDate\n\
             \"1\",\"Acme Corporation\",\"contact@acme.com\",\"Active\",\"2024-01-15\"\n\
             \"2\",\"TechStart Inc\",\"hello@techstart.com\",\"Active\",\"2024-02-20\""
        );
    }

    #[test]
    fn test_reports_csv_header_uses_wire_names() {
        let csv = to_csv(&seed_reports()).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "id,title,date,summary,type");
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_empty_rows_give_empty_payload() {
        let rows: Vec<ClientRecord> = Vec::new();
        assert_eq!(to_csv(&rows).unwrap(), "");
    }

    #[test]
    fn test_nulls_and_quotes() {
        let rows = vec![
            serde_json::json!({"name": "Say \"hi\"", "note": null}),
            serde_json::json!({"name": "No note"}),
        ];
        let csv = to_csv(&rows).unwrap();
        assert_eq!(csv, "name,note\n\"Say \"\"hi\"\"\",\"\"\n\"No note\",\"\"");
    }

    #[test]
    fn test_scalar_rows_are_rejected() {
        assert!(to_csv(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_exporter_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path().join("out"));

        let outcome = exporter.export(&seed_clients(), "clients", ExportFormat::Csv).unwrap();

        let ExportOutcome::Written { path, rows } = outcome else {
            panic!("expected a written file");
        };
        assert_eq!(rows, 4);
        assert_eq!(path, dir.path().join("out").join("clients.csv"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("id,name,email,status,joinDate\n"));
    }

    #[test]
    fn test_pdf_is_coming_soon() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path());
        let outcome = exporter.export(&seed_clients(), "clients", ExportFormat::Pdf).unwrap();
        assert_eq!(outcome, ExportOutcome::ComingSoon(ExportFormat::Pdf));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
