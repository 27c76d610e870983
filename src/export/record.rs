use crate::sheet::SheetRow;

/// Column separator for file content. Embedded commas are not escaped.
pub const CONTENT_DELIMITER: &str = ",";

/// A data row as it is written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub row: usize,
    pub filename: String,
    pub content: String,
}

impl OutputRecord {
    pub fn from_row(row: &SheetRow) -> Self {
        let content = row
            .cells
            .iter()
            .skip(1)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(CONTENT_DELIMITER);

        Self {
            row: row.number,
            filename: row.cell(0).to_string(),
            content,
        }
    }
}
