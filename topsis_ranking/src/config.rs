// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The direction in which the raw values of a criterion are preferable.
///
/// A benefit criterion rewards larger raw values, a cost criterion rewards
/// smaller raw values. The polarity is fixed for the duration of a
/// computation.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum CriterionPolarity {
    Benefit,
    Cost,
}

/// A criterion of the decision, with its polarity attached.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Criterion {
    pub name: String,
    pub polarity: CriterionPolarity,
}

/// A full decision problem: the alternatives to rank, the criteria to rank
/// them against, and the raw decision matrix.
///
/// Invariants expected by the engine (checked before any computation runs):
/// - `values` has one row per alternative and one column per criterion,
/// - every cell of `values` is a finite number.
#[derive(PartialEq, Debug, Clone)]
pub struct DecisionProblem {
    pub alternatives: Vec<String>,
    pub criteria: Vec<Criterion>,
    pub values: Vec<Vec<f64>>,
}

// ******** Output data structures *********

/// The outcome for a single alternative.
///
/// `preference` is the relative closeness to the ideal solution, in [0, 1]
/// with higher being better. `rank` is 1-based and dense: every alternative
/// gets a distinct successive rank, including on ties.
#[derive(PartialEq, Debug, Clone)]
pub struct RankingResult {
    pub alternative: String,
    pub preference: f64,
    pub rank: u32,
}

/// Errors that prevent a ranking from being computed.
///
/// All of these are deterministic input errors: the caller can correct the
/// input and retry. The engine never returns a partial ranking.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RankingErrors {
    EmptyAlternatives,
    EmptyCriteria,
    EmptyMatrix,
    /// The number of matrix rows does not match the number of alternatives.
    RowCountMismatch { expected: usize, found: usize },
    /// A matrix row does not have one value per criterion.
    JaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A criterion has no entry in the weight mapping. This signals an
    /// inconsistency between the priority order and the declared criteria.
    MissingWeight { criterion: String },
    /// A criterion has a NaN or infinite weight.
    InvalidWeight { criterion: String },
    /// A matrix cell is NaN or infinite at the point normalization runs.
    NonFiniteValue { row: usize, column: usize },
}

impl Error for RankingErrors {}

impl Display for RankingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingErrors::EmptyAlternatives => write!(f, "no alternatives provided"),
            RankingErrors::EmptyCriteria => write!(f, "no criteria provided"),
            RankingErrors::EmptyMatrix => write!(f, "the decision matrix is empty"),
            RankingErrors::RowCountMismatch { expected, found } => write!(
                f,
                "the decision matrix has {} rows but {} alternatives were declared",
                found, expected
            ),
            RankingErrors::JaggedMatrix {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} of the decision matrix has {} values, expected {} (one per criterion)",
                row + 1,
                found,
                expected
            ),
            RankingErrors::MissingWeight { criterion } => write!(
                f,
                "no weight for criterion '{}': check the priority order against the declared criteria",
                criterion
            ),
            RankingErrors::InvalidWeight { criterion } => write!(
                f,
                "the weight for criterion '{}' is not a finite number",
                criterion
            ),
            RankingErrors::NonFiniteValue { row, column } => write!(
                f,
                "the decision matrix contains a non-finite value at row {}, column {}",
                row + 1,
                column + 1
            ),
        }
    }
}
