// Primitives for reading CSV decision matrices.

use log::debug;
use snafu::prelude::*;

use crate::mcda::{io_common::parse_numeric_cell, *};

/// Reads the alternative names and the decision matrix from a CSV file.
///
/// The first row is expected to be a header. The alternative names come from
/// the configured alternative column; the column of each declared criterion
/// is located by matching the criterion name against the header. Columns
/// that match no criterion are ignored.
pub fn read_csv_matrix(
    path: String,
    source: &DataSource,
    criteria: &[McdaCriterion],
) -> McdaResult<(Vec<String>, Vec<Vec<f64>>)> {
    let alternative_col = source.alternative_column_index()?;
    let first_value_row = source.first_value_row_index()?;

    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path.clone())
        .context(CsvOpenSnafu { path: path.clone() })?;
    let mut records = rdr.into_records();

    let header = match records.next() {
        Some(line_r) => line_r.context(CsvLineParseSnafu {})?,
        None => whatever!("The CSV file {} is empty", path),
    };
    let headers: Vec<String> = header.iter().map(|s| s.trim().to_string()).collect();
    debug!("read_csv_matrix: header: {:?}", headers);

    let criteria_cols: Vec<usize> = criteria
        .iter()
        .map(|c| {
            headers
                .iter()
                .position(|h| h == &c.name)
                .context(MissingCsvColumnSnafu {
                    name: c.name.clone(),
                })
        })
        .collect::<McdaResult<_>>()?;

    // The header is row 1; skip anything before the first data row.
    let records = records.skip(first_value_row.saturating_sub(2));

    let mut alternatives: Vec<String> = Vec::new();
    let mut values: Vec<Vec<f64>> = Vec::new();
    let mut lineno = first_value_row;
    for line_r in records {
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_csv_matrix: line {}: {:?}", lineno, line);

        let name = line
            .get(alternative_col)
            .context(CsvLineTooShortSnafu { lineno })?
            .trim()
            .to_string();

        let mut row: Vec<f64> = Vec::with_capacity(criteria_cols.len());
        for (&col, criterion) in criteria_cols.iter().zip(criteria.iter()) {
            let raw = line.get(col).context(CsvLineTooShortSnafu { lineno })?;
            row.push(parse_numeric_cell(raw, lineno, &criterion.name)?);
        }

        alternatives.push(name);
        values.push(row);
        lineno += 1;
    }
    Ok((alternatives, values))
}
