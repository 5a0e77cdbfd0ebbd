use log::{info, warn};

use snafu::{prelude::*, Snafu};
use topsis_ranking::*;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::mcda::config_reader::*;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;

#[derive(Debug, Snafu)]
pub enum McdaError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error parsing a JSON number"))]
    ParsingJsonNumber {},
    #[snafu(display("Error writing file {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening the CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a line of the CSV file"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} of the CSV file is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display(
        "Line {lineno} of the CSV file has a non-numeric value for criterion '{column}': '{value}'"
    ))]
    CsvValueParse {
        lineno: usize,
        column: String,
        value: String,
    },
    #[snafu(display("No CSV column matches criterion '{name}'"))]
    MissingCsvColumn { name: String },
    #[snafu(display(
        "Unknown type '{value}' for criterion '{name}': expected 'benefit' or 'cost'"
    ))]
    UnknownCriterionType { name: String, value: String },
    #[snafu(display(""))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type McdaResult<T> = Result<T, McdaError>;

fn build_summary_js(
    config: &McdaConfig,
    weights: &HashMap<String, f64>,
    ranking: &[RankingResult],
) -> JSValue {
    let c = OutputConfig {
        analysis: config.output_settings.analysis_name.clone(),
        alternatives: ranking.len(),
        criteria: config.criteria.len(),
    };
    let mut weights_js: JSMap<String, JSValue> = JSMap::new();
    for (name, w) in weights.iter() {
        weights_js.insert(name.clone(), json!(*w));
    }
    let ranking_js: Vec<JSValue> = ranking
        .iter()
        .map(|r| {
            json!({
                "alternative": r.alternative,
                "preference": r.preference,
                "rank": r.rank
            })
        })
        .collect();
    json!({
        "config": c,
        "weights": weights_js,
        "ranking": ranking_js
    })
}

// Assembles the decision matrix from the configured data source.
fn read_decision_data(
    config_path: &Path,
    config: &McdaConfig,
) -> McdaResult<(Vec<String>, Vec<Vec<f64>>)> {
    match config.data_source.provider.as_str() {
        "inline" => {
            let alternatives = match &config.alternatives {
                Some(x) => x.clone(),
                None => whatever!("the inline data source requires the 'alternatives' field"),
            };
            let values = match &config.values {
                Some(x) => x.clone(),
                None => whatever!("the inline data source requires the 'values' field"),
            };
            Ok((alternatives, values))
        }
        "csv" => {
            let file_path = match &config.data_source.file_path {
                Some(x) => x.clone(),
                None => whatever!("the csv data source requires the 'filePath' field"),
            };
            let root_p = config_path.parent().context(MissingParentDirSnafu {})?;
            let p: PathBuf = [root_p.display().to_string(), file_path].iter().collect();
            let p2 = p.as_path().display().to_string();
            info!("Attempting to read decision data file {:?}", p2);
            io_csv::read_csv_matrix(p2, &config.data_source, &config.criteria)
        }
        x => whatever!("Data source provider not implemented: {:?}", x),
    }
}

fn validate_criteria(config: &McdaConfig) -> McdaResult<Vec<Criterion>> {
    config
        .criteria
        .iter()
        .map(|c| {
            Ok(Criterion {
                name: c.name.clone(),
                polarity: c.polarity()?,
            })
        })
        .collect()
}

/// Runs a full analysis from a configuration file: reads the decision data,
/// derives the ROC weights from the priority order, computes the TOPSIS
/// ranking and emits the JSON summary.
pub fn run_analysis(
    config_path: String,
    check_summary_path: Option<String>,
    out_path: Option<String>,
) -> McdaResult<()> {
    let config_p = Path::new(config_path.as_str());
    let config_str = fs::read_to_string(config_path.clone()).context(OpeningJsonSnafu {
        path: config_path.clone(),
    })?;
    let config: McdaConfig = serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    info!("config: {:?}", config);

    let criteria = validate_criteria(&config)?;
    let (alternatives, values) = read_decision_data(config_p, &config)?;

    let problem = DecisionProblem {
        alternatives,
        criteria,
        values,
    };

    let weights = derive_roc_weights(&config.prioritized_criteria);
    {
        let mut sorted_weights: Vec<(&String, &f64)> = weights.iter().collect();
        sorted_weights.sort_by(|p1, p2| p2.1.total_cmp(p1.1));
        for (name, w) in sorted_weights.iter() {
            info!("Criterion weight: {}: {:.6}", name, w);
        }
    }

    let res = run_topsis(&problem, &weights);
    let ranking = match res {
        Result::Ok(x) => x,
        Result::Err(x) => {
            whatever!("Ranking error: {}", x)
        }
    };

    // Assemble the final json
    let result_js = build_summary_js(&config, &weights, &ranking);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let out = out_path.or_else(|| config.output_settings.output_path.clone());
    match out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(p) => {
            fs::write(p, &pretty_js_stats).context(WritingSummarySnafu {
                path: p.to_string(),
            })?;
            info!("Summary written to {}", p);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between computed summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snafu::ErrorCompat;

    fn test_dir() -> &'static str {
        option_env!("MCDA_TEST_DIR").unwrap_or("test_data")
    }

    fn run_analysis_test(test_name: &str) {
        info!("Running test {}", test_name);
        let res = run_analysis(
            format!("{}/{}/{}_config.json", test_dir(), test_name, test_name),
            Some(format!(
                "{}/{}/{}_expected_summary.json",
                test_dir(),
                test_name,
                test_name
            )),
            None,
        );
        if let Err(e) = res {
            eprintln!("An error occured: {}", e);
            if let Some(bt) = ErrorCompat::backtrace(&e) {
                eprintln!("trace: {}", bt);
            }
            panic!("Analysis test {} failed: {}", test_name, e);
        }
    }

    #[test]
    fn simple_two_criteria() {
        run_analysis_test("simple_two_criteria");
    }

    #[test]
    fn single_alternative() {
        run_analysis_test("single_alternative");
    }

    #[test]
    fn zero_value_column() {
        run_analysis_test("zero_value_column");
    }

    #[test]
    fn csv_laptops() {
        run_analysis_test("csv_laptops");
    }

    #[test]
    fn missing_weight_fails() {
        let res = run_analysis(
            format!("{}/missing_weight/missing_weight_config.json", test_dir()),
            None,
            None,
        );
        let err = res.expect_err("an incomplete priority order should fail");
        assert!(err.to_string().contains("quality"), "{}", err);
    }

    #[test]
    fn zero_column_index_fails() {
        let res = run_analysis(
            format!(
                "{}/zero_column_index/zero_column_index_config.json",
                test_dir()
            ),
            None,
            None,
        );
        let err = res.expect_err("a 0-based column index should fail");
        assert!(err.to_string().contains("1-based"), "{}", err);
    }

    #[test]
    fn unknown_criterion_type_fails() {
        let res = run_analysis(
            format!(
                "{}/unknown_criterion_type/unknown_criterion_type_config.json",
                test_dir()
            ),
            None,
            None,
        );
        let err = res.expect_err("an unrecognized polarity should fail");
        assert!(err.to_string().contains("expected 'benefit' or 'cost'"), "{}", err);
    }
}
