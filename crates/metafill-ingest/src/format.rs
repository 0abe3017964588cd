use std::fmt;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Extensions read as spreadsheet workbooks.
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// How an input file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Delimited(TableFormat),
    /// First worksheet of a spreadsheet workbook.
    Workbook,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let is_workbook = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| WORKBOOK_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if is_workbook {
            Ok(Self::Workbook)
        } else {
            TableFormat::from_path(path).map(Self::Delimited)
        }
    }
}

/// Delimited text layouts accepted for input and written for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Csv,
    Tsv,
}

impl TableFormat {
    /// Picks the layout from a file extension: `.csv` is comma separated,
    /// `.tsv` and `.txt` are tab separated.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" | "txt" => Ok(Self::Tsv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_selects_delimiter() {
        assert_eq!(
            TableFormat::from_path(Path::new("a/b.CSV")).unwrap(),
            TableFormat::Csv
        );
        assert_eq!(
            TableFormat::from_path(Path::new("b.txt")).unwrap().delimiter(),
            b'\t'
        );
    }

    #[test]
    fn workbooks_are_not_delimited() {
        let err = TableFormat::from_path(Path::new("samples.xlsx")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedFormat { extension, .. } if extension == "xlsx"
        ));
        assert_eq!(
            InputFormat::from_path(Path::new("samples.XLSX")).unwrap(),
            InputFormat::Workbook
        );
    }

    #[test]
    fn unknown_extensions_are_unsupported() {
        assert!(InputFormat::from_path(Path::new("samples.json")).is_err());
        assert!(InputFormat::from_path(Path::new("samples")).is_err());
    }
}
