use calamine::Data;

/// Render a typed cell as the text written to an output file.
///
/// Strings pass through untouched. Numbers, including date/time serials,
/// are truncated toward zero and written as a decimal integer. Every other
/// cell type (blank, boolean, error, ISO date or duration) becomes `""`.
pub fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => truncate(*f).to_string(),
        Data::DateTime(dt) => truncate(dt.as_f64()).to_string(),
        _ => String::new(),
    }
}

// `as` truncates toward zero and saturates at the i64 bounds; NaN maps to 0.
fn truncate(value: f64) -> i64 {
    value as i64
}
