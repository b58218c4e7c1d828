/*!
# Points File Parsing

Parses the raw-points upload: a header line naming the (case-insensitive,
any-order) columns `id`, `X`, `Y`, followed by one point per line. The
delimiter is auto-detected (comma if the header line contains one,
otherwise tab), matching the contract `snap_points` is given.
*/

use crate::core::error::{Result, TourError};
use csv::ReaderBuilder;
use std::io::Cursor;

/// A raw, caller-supplied point before snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

/// Parses `id,X,Y` (or tab-delimited) bytes into an ordered list of points.
///
/// # Errors
///
/// Returns [`TourError::BadPointsFile`] if the upload is empty, the header
/// is missing any of `id`/`X`/`Y`, or any row fails to parse as the
/// expected types.
pub fn parse_points(bytes: &[u8]) -> Result<Vec<RawPoint>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| TourError::bad_points_file(format!("points file is not valid UTF-8: {err}")))?;

    let header_line = text
        .lines()
        .next()
        .ok_or_else(|| TourError::bad_points_file("points file is empty"))?;

    let delimiter = if header_line.contains(',') { b',' } else { b'\t' };

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(Cursor::new(bytes));

    let headers = reader
        .headers()
        .map_err(|err| TourError::bad_points_file(format!("could not read header row: {err}")))?
        .clone();

    let find_column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| TourError::bad_points_file(format!("missing required column '{name}'")))
    };
    let id_col = find_column("id")?;
    let x_col = find_column("X")?;
    let y_col = find_column("Y")?;

    let mut points = Vec::new();
    for (row_number, record) in reader.records().enumerate() {
        let record = record.map_err(|err| {
            TourError::bad_points_file(format!("row {} could not be read: {err}", row_number + 2))
        })?;
        let parse_field = |col: usize, field: &str| -> Result<&str> {
            record.get(col).ok_or_else(|| {
                TourError::bad_points_file(format!(
                    "row {} is missing a value for '{field}'",
                    row_number + 2
                ))
            })
        };
        let id_str = parse_field(id_col, "id")?;
        let x_str = parse_field(x_col, "X")?;
        let y_str = parse_field(y_col, "Y")?;

        let id: i64 = id_str.trim().parse().map_err(|_| {
            TourError::bad_points_file(format!(
                "row {}: 'id' value '{id_str}' is not an integer",
                row_number + 2
            ))
        })?;
        let x: f64 = x_str.trim().parse().map_err(|_| {
            TourError::bad_points_file(format!(
                "row {}: 'X' value '{x_str}' is not a number",
                row_number + 2
            ))
        })?;
        let y: f64 = y_str.trim().parse().map_err(|_| {
            TourError::bad_points_file(format!(
                "row {}: 'Y' value '{y_str}' is not a number",
                row_number + 2
            ))
        })?;

        points.push(RawPoint { id, x, y });
    }

    if points.is_empty() {
        return Err(TourError::bad_points_file(
            "points file has a header but no data rows",
        ));
    }

    Ok(points)
}
