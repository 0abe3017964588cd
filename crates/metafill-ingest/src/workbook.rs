//! Spreadsheet workbook reading.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::{IngestError, Result};
use crate::reader::{normalize_header, string_frame};

/// Reads the first worksheet of a workbook. The first row holds the column
/// names; every cell is rendered as a string.
pub fn read_workbook(path: &Path) -> Result<DataFrame> {
    let workbook_error = |source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|cell| {
                    render_cell(cell)
                        .map(|name| normalize_header(&name))
                        .unwrap_or_default()
                })
                .collect()
        })
        .unwrap_or_default();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for row in rows {
        let cells: Vec<Option<String>> = (0..headers.len())
            .map(|idx| row.get(idx).and_then(render_cell))
            .collect();
        if cells.iter().all(|cell| cell.as_deref().is_none_or(|value| value.trim().is_empty())) {
            continue;
        }
        for (column, cell) in columns.iter_mut().zip(cells) {
            column.push(cell);
        }
    }

    let df = string_frame(headers, columns)?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded input workbook"
    );
    Ok(df)
}

/// Cell text as the submitter would see it. Booleans render as
/// `TRUE`/`FALSE`; whole-day dates drop the time part.
pub(crate) fn render_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(value) if value.is_empty() => None,
        Data::String(value) => Some(value.clone()),
        Data::Bool(true) => Some("TRUE".to_string()),
        Data::Bool(false) => Some("FALSE".to_string()),
        Data::DateTime(value) => Some(match value.as_datetime() {
            Some(stamp) if stamp.time() == chrono::NaiveTime::MIN => {
                stamp.format("%Y-%m-%d").to_string()
            }
            Some(stamp) => stamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => value.as_f64().to_string(),
        }),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_render_as_typed() {
        assert_eq!(render_cell(&Data::Empty), None);
        assert_eq!(render_cell(&Data::String(String::new())), None);
        assert_eq!(render_cell(&Data::Bool(true)).as_deref(), Some("TRUE"));
        assert_eq!(render_cell(&Data::Float(34.0)).as_deref(), Some("34"));
        assert_eq!(render_cell(&Data::Float(2.5)).as_deref(), Some("2.5"));
        assert_eq!(render_cell(&Data::Int(9606)).as_deref(), Some("9606"));
        assert_eq!(
            render_cell(&Data::String("not provided".to_string())).as_deref(),
            Some("not provided")
        );
    }

    #[test]
    fn corrupt_workbook_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("raw.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        let err = read_workbook(&path).unwrap_err();
        assert!(matches!(err, IngestError::Workbook { .. }));
    }
}
