//! CSV decoding into raw string rows.

use crate::error::WorklistResult;

/// Decode CSV bytes into raw rows. The first record is the header row.
///
/// Records may have differing lengths; short rows are padded later during normalisation.
pub fn read_csv(bytes: &[u8]) -> WorklistResult<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    read_csv_from_reader(&mut rdr)
}

/// Decode raw rows from an existing CSV reader.
pub fn read_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> WorklistResult<Vec<Vec<String>>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}
