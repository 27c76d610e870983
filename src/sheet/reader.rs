use crate::error::{Result, SheetSplitError};
use crate::sheet::cell::cell_to_text;
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One physical row of a sheet, already rendered as text.
///
/// `cells[0]` is always column A, regardless of where the sheet's used
/// range starts. Trailing blank cells are not included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based row number as shown by spreadsheet applications
    pub number: usize,
    pub cells: Vec<String>,
}

impl SheetRow {
    pub fn new(number: usize, cells: Vec<String>) -> Self {
        Self { number, cells }
    }

    /// Text of the cell at `index`, or `""` past the row's extent.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

pub struct SheetReader {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl SheetReader {
    /// Open a workbook, picking the format from the file extension.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let workbook = open_workbook_auto(&path).map_err(|source| SheetSplitError::WorkbookOpen {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "opened workbook");
        Ok(Self { path, workbook })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Every physical row of the first sheet, header included.
    pub fn first_sheet_rows(&mut self) -> Result<Vec<SheetRow>> {
        let sheet_name = self
            .sheet_names()
            .into_iter()
            .next()
            .ok_or_else(|| SheetSplitError::NoSheets {
                path: self.path.clone(),
            })?;

        let data = match self.workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(|source| SheetSplitError::WorkbookOpen {
                path: self.path.clone(),
                source,
            })?,
            None => {
                return Err(SheetSplitError::NoSheets {
                    path: self.path.clone(),
                })
            }
        };

        // Not every format exposes formulas; without them cached values are used.
        let formulas = self.workbook.worksheet_formula(&sheet_name).ok();

        let rows = rows_from_ranges(&data, formulas.as_ref());
        debug!(sheet = %sheet_name, rows = rows.len(), "read first sheet");
        Ok(rows)
    }

    /// Open `path` and return the rows after the header. The workbook is
    /// closed before this returns.
    pub fn read_data_rows<P: AsRef<Path>>(path: P) -> Result<Vec<SheetRow>> {
        let mut reader = Self::open(path)?;
        let rows = reader.first_sheet_rows()?;
        Ok(data_rows(rows))
    }
}

/// Drop the header (the first physical row).
pub fn data_rows(rows: Vec<SheetRow>) -> Vec<SheetRow> {
    rows.into_iter().skip(1).collect()
}

/// Build rows from a sheet's value layer and, when available, its formula
/// layer. Formula cells render as `""`; rows with no defined cell are skipped.
pub fn rows_from_ranges(data: &Range<Data>, formulas: Option<&Range<String>>) -> Vec<SheetRow> {
    let Some((first_row, last_row, last_col)) = bounds(data, formulas) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for r in first_row..=last_row {
        let mut cells = Vec::with_capacity(last_col as usize + 1);
        let mut extent = 0;

        for c in 0..=last_col {
            let is_formula = formulas
                .and_then(|f| f.get_value((r, c)))
                .is_some_and(|f| !f.is_empty());
            let value = data.get_value((r, c));

            let text = if is_formula {
                String::new()
            } else {
                value.map(cell_to_text).unwrap_or_default()
            };
            cells.push(text);

            if is_formula || value.is_some_and(|v| !matches!(v, Data::Empty)) {
                extent = c as usize + 1;
            }
        }

        if extent == 0 {
            continue;
        }
        cells.truncate(extent);
        rows.push(SheetRow::new(r as usize + 1, cells));
    }

    rows
}

fn bounds(data: &Range<Data>, formulas: Option<&Range<String>>) -> Option<(u32, u32, u32)> {
    let mut spans = Vec::with_capacity(2);
    if let (Some(start), Some(end)) = (data.start(), data.end()) {
        spans.push((start, end));
    }
    if let Some(f) = formulas {
        if let (Some(start), Some(end)) = (f.start(), f.end()) {
            spans.push((start, end));
        }
    }

    let first_row = spans.iter().map(|(s, _)| s.0).min()?;
    let last_row = spans.iter().map(|(_, e)| e.0).max()?;
    let last_col = spans.iter().map(|(_, e)| e.1).max()?;
    Some((first_row, last_row, last_col))
}
