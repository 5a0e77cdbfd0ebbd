// Primitives shared by the input readers.

use snafu::prelude::*;

use crate::mcda::{CsvValueParseSnafu, McdaResult};

/// Parses a decision-matrix cell into a finite number. Non-numeric and
/// non-finite content is rejected here so that the engine never sees it.
pub fn parse_numeric_cell(raw: &str, lineno: usize, column: &str) -> McdaResult<f64> {
    let value: Option<f64> = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    value.context(CsvValueParseSnafu {
        lineno,
        column: column.to_string(),
        value: raw.to_string(),
    })
}
