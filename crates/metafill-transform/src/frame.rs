//! String-cell working copy of a metadata table.
//!
//! Every cell is either a string or missing; the populator operates on this
//! view and converts back to a polars `DataFrame` at the end.

use indexmap::IndexMap;
use polars::prelude::*;

/// Column-major table of optional strings with ordered columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFrame {
    columns: IndexMap<String, Vec<Option<String>>>,
    height: usize,
}

impl MetadataFrame {
    /// Copies `df`, casting every column to strings.
    pub fn from_dataframe(df: &DataFrame) -> PolarsResult<Self> {
        let mut columns = IndexMap::with_capacity(df.width());
        for column in df.get_columns() {
            let casted = column.cast(&DataType::String)?;
            let values = casted
                .str()?
                .into_iter()
                .map(|value| value.map(str::to_string))
                .collect();
            columns.insert(column.name().to_string(), values);
        }
        Ok(Self {
            columns,
            height: df.height(),
        })
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|(name, values)| Series::new(name.as_str().into(), values.clone()).into_column())
            .collect();
        DataFrame::new(columns)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[Option<String>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Cell value; `None` for a missing cell or an absent column.
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        self.columns.get(name)?.get(row)?.as_deref()
    }

    /// Writes a cell. Absent columns are ignored.
    pub fn set(&mut self, row: usize, name: &str, value: Option<String>) {
        if let Some(cell) = self.columns.get_mut(name).and_then(|c| c.get_mut(row)) {
            *cell = value;
        }
    }

    /// Adds an all-missing column; returns whether it was created.
    pub fn ensure_column(&mut self, name: &str) -> bool {
        if self.columns.contains_key(name) {
            return false;
        }
        self.columns
            .insert(name.to_string(), vec![None; self.height]);
        true
    }

    /// Inserts or replaces a whole column.
    pub fn insert_column(&mut self, name: &str, values: Vec<Option<String>>) {
        debug_assert_eq!(values.len(), self.height);
        self.columns.insert(name.to_string(), values);
    }

    /// Applies `f` to every cell of every column.
    pub fn map_cells(&mut self, mut f: impl FnMut(&mut Option<String>)) {
        for values in self.columns.values_mut() {
            values.iter_mut().for_each(&mut f);
        }
    }

    pub fn row(&self, row: usize) -> RowView<'_> {
        RowView { frame: self, row }
    }

    /// New frame holding `rows` (in that order) and `columns`.
    pub fn select(&self, rows: &[usize], columns: &[String]) -> Self {
        let selected = columns
            .iter()
            .filter_map(|name| {
                let values = self.columns.get(name)?;
                let picked = rows.iter().map(|&row| values[row].clone()).collect();
                Some((name.clone(), picked))
            })
            .collect();
        Self {
            columns: selected,
            height: rows.len(),
        }
    }
}

/// Read-only view of one row, handed to transformer functions.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    frame: &'a MetadataFrame,
    row: usize,
}

impl<'a> RowView<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.frame.get(self.row, column)
    }

    pub fn index(&self) -> usize {
        self.row
    }
}
