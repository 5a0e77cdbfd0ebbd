use crate::mcda::*;

use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use serde_json::Value as JSValue;
use topsis_ranking::CriterionPolarity;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "analysisName")]
    pub analysis_name: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

/// The 'config' section of the output summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub analysis: String,
    pub alternatives: usize,
    pub criteria: usize,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "alternativeColumnIndex")]
    _alternative_column_index: Option<JSValue>,
    #[serde(rename = "firstValueRowIndex")]
    _first_value_row_index: Option<JSValue>,
}

impl DataSource {
    /// 0-based index of the column holding the alternative names. The
    /// configuration is 1-based to respect most conventions in the
    /// spreadsheet world; the first column is the default.
    pub fn alternative_column_index(&self) -> McdaResult<usize> {
        if self._alternative_column_index.is_none() {
            return Ok(0);
        }
        let x = read_js_int(&self._alternative_column_index)?;
        if x == 0 {
            whatever!("alternativeColumnIndex is 1-based: the first column is column 1");
        }
        Ok(x - 1)
    }

    /// 1-based number of the first data row, the header being row 1.
    /// Defaults to the row right after the header.
    pub fn first_value_row_index(&self) -> McdaResult<usize> {
        if self._first_value_row_index.is_none() {
            return Ok(2);
        }
        read_js_int(&self._first_value_row_index)
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct McdaCriterion {
    pub name: String,
    #[serde(rename = "type")]
    pub criterion_type: String,
}

impl McdaCriterion {
    pub fn polarity(&self) -> McdaResult<CriterionPolarity> {
        match self.criterion_type.as_str() {
            "benefit" => Ok(CriterionPolarity::Benefit),
            "cost" => Ok(CriterionPolarity::Cost),
            x => Err(McdaError::UnknownCriterionType {
                name: self.name.clone(),
                value: x.to_string(),
            }),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct McdaConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "dataSource")]
    pub data_source: DataSource,
    pub criteria: Vec<McdaCriterion>,
    #[serde(rename = "prioritizedCriteria")]
    pub prioritized_criteria: Vec<String>,
    // Only read for the inline data source.
    pub alternatives: Option<Vec<String>>,
    pub values: Option<Vec<Vec<f64>>>,
}

pub fn read_summary(path: String) -> McdaResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> McdaResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
