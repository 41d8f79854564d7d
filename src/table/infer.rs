use super::Column;

/// Cell at `idx`, whitespace stripped. The csv reader has already unquoted
/// fields, and rows past their last cell read as empty.
fn cell_at(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("").trim()
}

/// Build one typed column from row-major records.
///
/// The rule, applied over the whole file: the column is numeric when every
/// non-empty cell parses as `f64`, and text otherwise. Empty cells load as
/// nulls under either type, so a column with no values at all comes out as
/// numeric nulls.
pub(crate) fn column_from_rows(rows: &[Vec<String>], idx: usize) -> Column {
    let numeric = rows
        .iter()
        .map(|row| cell_at(row, idx))
        .all(|c| c.is_empty() || c.parse::<f64>().is_ok());

    if numeric {
        Column::Num(
            rows.iter()
                .map(|row| cell_at(row, idx).parse::<f64>().ok())
                .collect(),
        )
    } else {
        Column::Text(
            rows.iter()
                .map(|row| {
                    let cell = cell_at(row, idx);
                    (!cell.is_empty()).then(|| cell.to_string())
                })
                .collect(),
        )
    }
}
