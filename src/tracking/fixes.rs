//! Plain-text fix streams
//!
//! One `lat,lon` pair per line in decimal degrees. Blank lines and lines
//! starting with `#` are ignored, which lets recorded tracks carry headers.

use std::io::BufRead;
use thiserror::Error;

use crate::domain::GeoCoordinate;

#[derive(Debug, Error)]
pub enum FixParseError {
    #[error("line {line}: expected `lat,lon`, got {found:?}")]
    Malformed { line: usize, found: String },
    #[error("line {line}: invalid {field} {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("failed to read fixes")]
    Io(#[from] std::io::Error),
}

/// Parse a single `lat,lon` line
///
/// Returns `Ok(None)` for blank and comment lines. `line` is only used to
/// label errors.
pub fn parse_fix(text: &str, line: usize) -> Result<Option<GeoCoordinate>, FixParseError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut fields = text.split(',').map(str::trim);
    let (Some(lat), Some(lon), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(FixParseError::Malformed {
            line,
            found: text.to_string(),
        });
    };

    let lat: f32 = lat.parse().map_err(|_| FixParseError::InvalidNumber {
        line,
        field: "latitude",
        value: lat.to_string(),
    })?;
    let lon: f32 = lon.parse().map_err(|_| FixParseError::InvalidNumber {
        line,
        field: "longitude",
        value: lon.to_string(),
    })?;

    Ok(Some(GeoCoordinate::new(lat, lon)))
}

/// Lazily parse fixes as lines arrive
///
/// Each line is read only when the next item is requested, so a live feed on
/// stdin is handled fix by fix. Blank and comment lines produce no item.
pub fn fixes<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<GeoCoordinate, FixParseError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(text) => parse_fix(&text, i + 1).transpose(),
            Err(e) => Some(Err(FixParseError::Io(e))),
        })
}

/// Read every fix from a buffered reader, stopping at the first bad line
pub fn read_fixes<R: BufRead>(reader: R) -> Result<Vec<GeoCoordinate>, FixParseError> {
    fixes(reader).collect()
}
