mod config;
pub mod builder;
pub mod manual;
#[cfg(test)]
mod test;

use log::{debug, info, warn};
use ordered_float::NotNan;

use std::cmp::Reverse;
use std::collections::HashMap;

pub use crate::config::*;

/// Derives criteria weights from a priority order with the Rank Order
/// Centroid method.
///
/// Arguments:
/// * `prioritized_criteria` the criteria names ordered from the most
///   important to the least important. Each name is expected to be unique.
///
/// The criterion at 1-based rank `j` out of `n` receives the raw weight
/// `(1/n) * sum(1/i for i in j..=n)`. The raw weights are then re-normalized
/// by their sum to absorb floating-point drift. The ROC weights of a
/// non-empty order always sum to a strictly positive value; should the sum
/// ever be exactly zero, the unnormalized weights are returned unchanged
/// instead of dividing by zero.
///
/// An empty order yields an empty mapping. Rejecting an empty criteria set
/// is the caller's responsibility.
pub fn derive_roc_weights(prioritized_criteria: &[String]) -> HashMap<String, f64> {
    let n = prioritized_criteria.len();
    if n == 0 {
        warn!("derive_roc_weights: no prioritized criteria provided");
        return HashMap::new();
    }

    // The total is accumulated in priority order: summing the map values
    // instead would depend on the map iteration order, which varies between
    // instances, and float addition is not associative.
    let mut weights: HashMap<String, f64> = HashMap::with_capacity(n);
    let mut total = 0.0;
    for (index, name) in prioritized_criteria.iter().enumerate() {
        // Ranks start at 1.
        let j = index + 1;
        let sum_term: f64 = (j..=n).map(|i| 1.0 / i as f64).sum();
        let w = sum_term / n as f64;
        total += w;
        weights.insert(name.clone(), w);
    }

    if total == 0.0 {
        warn!("derive_roc_weights: weights sum to zero, skipping normalization");
        return weights;
    }
    for w in weights.values_mut() {
        *w /= total;
    }
    debug!("derive_roc_weights: weights: {:?}", weights);
    weights
}

/// Ranks the alternatives of a decision problem with the TOPSIS method.
///
/// Arguments:
/// * `problem` the decision problem to rank
/// * `weights` the weight of every criterion, keyed by criterion name. All
///   declared criteria must have a finite weight (usually the output of
///   [derive_roc_weights]).
///
/// The result is sorted by rank: the alternative closest to the ideal
/// solution comes first. Alternatives with equal preference scores keep
/// their relative input order.
///
/// The call is atomic: any invalid input fails with a [RankingErrors]
/// before a ranking is assembled, and no partial result is ever returned.
pub fn run_topsis(
    problem: &DecisionProblem,
    weights: &HashMap<String, f64>,
) -> Result<Vec<RankingResult>, RankingErrors> {
    info!(
        "run_topsis: {} alternatives, {} criteria",
        problem.alternatives.len(),
        problem.criteria.len()
    );
    check_problem(problem)?;
    let ordered_weights = resolve_weights(&problem.criteria, weights)?;

    let normalized = normalize_matrix(&problem.values);
    let weighted = apply_weights(&normalized, &ordered_weights);
    let (ideal_positive, ideal_negative) = ideal_solutions(&weighted, &problem.criteria);
    let (dist_positive, dist_negative) = ideal_distances(&weighted, &ideal_positive, &ideal_negative);
    let preferences = preference_scores(&dist_positive, &dist_negative);

    let mut results: Vec<RankingResult> = problem
        .alternatives
        .iter()
        .zip(preferences.iter())
        .map(|(name, &preference)| RankingResult {
            alternative: name.clone(),
            preference,
            rank: 0,
        })
        .collect();

    // Every preference score is finite by construction of the stages above,
    // so the NotNan conversion cannot fail. The sort is stable: ties keep
    // their input order.
    results.sort_by_key(|r| Reverse(NotNan::new(r.preference).unwrap()));
    for (index, r) in results.iter_mut().enumerate() {
        r.rank = (index + 1) as u32;
    }

    info!("run_topsis: ranking: {:?}", results);
    Ok(results)
}

/// Runs the full analysis pipeline: ROC weights from the priority order,
/// then the TOPSIS ranking.
///
/// A priority order that omits a declared criterion fails with
/// [RankingErrors::MissingWeight] rather than silently substituting a zero
/// weight.
pub fn run_ranking_analysis(
    problem: &DecisionProblem,
    prioritized_criteria: &[String],
) -> Result<Vec<RankingResult>, RankingErrors> {
    let weights = derive_roc_weights(prioritized_criteria);
    run_topsis(problem, &weights)
}

// Shape and numeric integrity checks. Value conversion happens upstream;
// this re-validates defensively instead of coercing.
fn check_problem(problem: &DecisionProblem) -> Result<(), RankingErrors> {
    if problem.alternatives.is_empty() {
        return Err(RankingErrors::EmptyAlternatives);
    }
    if problem.criteria.is_empty() {
        return Err(RankingErrors::EmptyCriteria);
    }
    if problem.values.is_empty() {
        return Err(RankingErrors::EmptyMatrix);
    }
    if problem.values.len() != problem.alternatives.len() {
        return Err(RankingErrors::RowCountMismatch {
            expected: problem.alternatives.len(),
            found: problem.values.len(),
        });
    }
    let num_criteria = problem.criteria.len();
    for (i, row) in problem.values.iter().enumerate() {
        if row.len() != num_criteria {
            return Err(RankingErrors::JaggedMatrix {
                row: i,
                expected: num_criteria,
                found: row.len(),
            });
        }
        for (j, value) in row.iter().enumerate() {
            if !value.is_finite() {
                return Err(RankingErrors::NonFiniteValue { row: i, column: j });
            }
        }
    }
    Ok(())
}

// Resolves the sparse name-keyed mapping into a dense vector aligned with
// the criteria order, failing loudly on missing or non-finite entries.
fn resolve_weights(
    criteria: &[Criterion],
    weights: &HashMap<String, f64>,
) -> Result<Vec<f64>, RankingErrors> {
    criteria
        .iter()
        .map(|c| match weights.get(&c.name) {
            None => Err(RankingErrors::MissingWeight {
                criterion: c.name.clone(),
            }),
            Some(w) if !w.is_finite() => Err(RankingErrors::InvalidWeight {
                criterion: c.name.clone(),
            }),
            Some(w) => Ok(*w),
        })
        .collect()
}

// Stage 1: vector normalization. Each column is divided by its Euclidean
// norm. A column with a zero norm normalizes to all zeros instead of NaN.
fn normalize_matrix(values: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let num_alternatives = values.len();
    let num_criteria = values[0].len();
    let mut normalized = vec![vec![0.0; num_criteria]; num_alternatives];

    for j in 0..num_criteria {
        let norm: f64 = values
            .iter()
            .map(|row| row[j] * row[j])
            .sum::<f64>()
            .sqrt();
        if norm == 0.0 {
            debug!("normalize_matrix: column {} has a zero norm", j);
            continue;
        }
        for (i, row) in values.iter().enumerate() {
            normalized[i][j] = row[j] / norm;
        }
    }
    debug!("normalize_matrix: {:?}", normalized);
    normalized
}

// Stage 2: multiply every normalized value by its criterion weight.
fn apply_weights(normalized: &[Vec<f64>], weights: &[f64]) -> Vec<Vec<f64>> {
    let weighted: Vec<Vec<f64>> = normalized
        .iter()
        .map(|row| row.iter().zip(weights.iter()).map(|(v, w)| v * w).collect())
        .collect();
    debug!("apply_weights: {:?}", weighted);
    weighted
}

// Stage 3: positive (A+) and negative (A-) ideal solutions per column.
fn ideal_solutions(weighted: &[Vec<f64>], criteria: &[Criterion]) -> (Vec<f64>, Vec<f64>) {
    let mut ideal_positive = Vec::with_capacity(criteria.len());
    let mut ideal_negative = Vec::with_capacity(criteria.len());

    for (j, criterion) in criteria.iter().enumerate() {
        let max = weighted.iter().map(|row| row[j]).fold(f64::MIN, f64::max);
        let min = weighted.iter().map(|row| row[j]).fold(f64::MAX, f64::min);
        match criterion.polarity {
            CriterionPolarity::Benefit => {
                ideal_positive.push(max);
                ideal_negative.push(min);
            }
            CriterionPolarity::Cost => {
                ideal_positive.push(min);
                ideal_negative.push(max);
            }
        }
    }
    debug!(
        "ideal_solutions: positive: {:?} negative: {:?}",
        ideal_positive, ideal_negative
    );
    (ideal_positive, ideal_negative)
}

// Stage 4: Euclidean distance of every alternative to A+ and A-.
fn ideal_distances(
    weighted: &[Vec<f64>],
    ideal_positive: &[f64],
    ideal_negative: &[f64],
) -> (Vec<f64>, Vec<f64>) {
    let mut dist_positive = Vec::with_capacity(weighted.len());
    let mut dist_negative = Vec::with_capacity(weighted.len());

    for row in weighted.iter() {
        let dp: f64 = row
            .iter()
            .zip(ideal_positive.iter())
            .map(|(v, a)| (v - a) * (v - a))
            .sum::<f64>()
            .sqrt();
        let dn: f64 = row
            .iter()
            .zip(ideal_negative.iter())
            .map(|(v, a)| (v - a) * (v - a))
            .sum::<f64>()
            .sqrt();
        dist_positive.push(dp);
        dist_negative.push(dn);
    }
    debug!(
        "ideal_distances: positive: {:?} negative: {:?}",
        dist_positive, dist_negative
    );
    (dist_positive, dist_negative)
}

// Stage 5: relative closeness C* = D- / (D+ + D-). An alternative whose
// distances to both ideals are zero gets a preference of 0 instead of NaN.
fn preference_scores(dist_positive: &[f64], dist_negative: &[f64]) -> Vec<f64> {
    dist_positive
        .iter()
        .zip(dist_negative.iter())
        .enumerate()
        .map(|(i, (dp, dn))| {
            let total = dp + dn;
            if total == 0.0 {
                warn!("preference_scores: zero total distance for alternative {}", i);
                0.0
            } else {
                dn / total
            }
        })
        .collect()
}
