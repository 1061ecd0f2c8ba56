//! Workbook decoding: reads the first worksheet of an in-memory workbook into raw string rows.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{WorklistError, WorklistResult};

/// Decode the first worksheet of a workbook (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`).
///
/// Every cell is stringified (see [`cell_to_string`]); the first returned row is the header row.
/// Leading empty rows and columns are not part of the returned range.
pub fn read_first_sheet(bytes: &[u8]) -> WorklistResult<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| WorklistError::malformed("workbook has no sheets"))??;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    log::debug!(
        "read first sheet: {} rows x {} columns",
        rows.len(),
        range.width()
    );
    Ok(rows)
}

/// Stringify a cell the way it would be displayed.
///
/// - integral floats drop the fraction (`6.0` → `"6"`)
/// - booleans render as `TRUE` / `FALSE`
/// - dates render as `YYYY-MM-DD`, with `HH:MM:SS` when there is a time part
/// - error cells and empty cells become `""`
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if ndt.time() == chrono::NaiveTime::MIN => ndt.format("%Y-%m-%d").to_string(),
            Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use calamine::Data;

    use super::{cell_to_string, read_first_sheet};
    use crate::error::ErrorKind;

    #[test]
    fn numbers_render_without_spurious_fraction() {
        assert_eq!(cell_to_string(&Data::Float(6.0)), "6");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Float(9781234567897.0)), "9781234567897");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
    }

    #[test]
    fn scalars_and_blanks() {
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String(" Acme ".into())), " Acme ");
    }

    #[test]
    fn garbage_bytes_are_malformed_input() {
        let err = read_first_sheet(b"definitely not a workbook").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }
}
