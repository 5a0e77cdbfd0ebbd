pub use crate::config::*;

use crate::{run_ranking_analysis, run_topsis};

/// A builder for assembling a decision problem row by row.
///
/// ```
/// use topsis_ranking::builder::Builder;
/// use topsis_ranking::CriterionPolarity;
/// # use topsis_ranking::RankingErrors;
///
/// let mut builder = Builder::new()
///     .criterion("price", CriterionPolarity::Cost)
///     .criterion("quality", CriterionPolarity::Benefit)
///     .priority_order(&["quality".to_string(), "price".to_string()]);
///
/// builder.add_alternative("laptop A", &[10.0, 8.0])?;
/// builder.add_alternative("laptop B", &[5.0, 9.0])?;
///
/// let ranking = builder.rank()?;
/// assert_eq!(ranking[0].alternative, "laptop B");
///
/// # Ok::<(), RankingErrors>(())
/// ```
#[derive(Default)]
pub struct Builder {
    pub(crate) _criteria: Vec<Criterion>,
    pub(crate) _priority_order: Option<Vec<String>>,
    pub(crate) _alternatives: Vec<String>,
    pub(crate) _rows: Vec<Vec<f64>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _criteria: Vec::new(),
            _priority_order: None,
            _alternatives: Vec::new(),
            _rows: Vec::new(),
        }
    }

    /// Declares a criterion. The declaration order defines the column order
    /// of the decision matrix.
    pub fn criterion(mut self, name: &str, polarity: CriterionPolarity) -> Builder {
        self._criteria.push(Criterion {
            name: name.to_string(),
            polarity,
        });
        self
    }

    /// Sets the importance order of the criteria, from the most important to
    /// the least important. The ROC weights are derived from this order when
    /// the ranking runs.
    pub fn priority_order(mut self, prioritized_criteria: &[String]) -> Builder {
        self._priority_order = Some(prioritized_criteria.to_vec());
        self
    }

    /// Adds an alternative with its raw values, one per declared criterion
    /// and in the declaration order.
    pub fn add_alternative(&mut self, name: &str, values: &[f64]) -> Result<(), RankingErrors> {
        if values.len() != self._criteria.len() {
            return Err(RankingErrors::JaggedMatrix {
                row: self._rows.len(),
                expected: self._criteria.len(),
                found: values.len(),
            });
        }
        self._alternatives.push(name.to_string());
        self._rows.push(values.to_vec());
        Ok(())
    }

    /// Returns the assembled decision problem without running it.
    pub fn problem(&self) -> DecisionProblem {
        DecisionProblem {
            alternatives: self._alternatives.clone(),
            criteria: self._criteria.clone(),
            values: self._rows.clone(),
        }
    }

    /// Runs the full analysis on the assembled problem.
    ///
    /// With a priority order set, the weights are derived with ROC. Without
    /// one, the declaration order of the criteria is used as the priority
    /// order.
    pub fn rank(&self) -> Result<Vec<RankingResult>, RankingErrors> {
        let problem = self.problem();
        match &self._priority_order {
            Some(order) => run_ranking_analysis(&problem, order),
            None => {
                let order: Vec<String> =
                    self._criteria.iter().map(|c| c.name.clone()).collect();
                run_ranking_analysis(&problem, &order)
            }
        }
    }

    /// Runs the TOPSIS ranking with explicit weights, bypassing ROC.
    pub fn rank_with_weights(
        &self,
        weights: &std::collections::HashMap<String, f64>,
    ) -> Result<Vec<RankingResult>, RankingErrors> {
        run_topsis(&self.problem(), weights)
    }
}
