use crate::*;
use proptest::{prelude::prop, prop_assert, prop_assert_eq, prop_compose, proptest};

#[track_caller]
fn assert_within(value: f64, expected: f64, tolerance: f64) {
    let diff = (value - expected).abs();
    assert!(
        diff <= tolerance,
        "Expected value of {expected} +- {tolerance} but got {value} which is off by {diff}",
    );
}

fn criteria_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("c{}", i)).collect()
}

fn cost_quality_problem() -> DecisionProblem {
    DecisionProblem {
        alternatives: vec!["A".to_string(), "B".to_string()],
        criteria: vec![
            Criterion {
                name: "cost".to_string(),
                polarity: CriterionPolarity::Cost,
            },
            Criterion {
                name: "quality".to_string(),
                polarity: CriterionPolarity::Benefit,
            },
        ],
        values: vec![vec![10.0, 8.0], vec![5.0, 9.0]],
    }
}

#[test]
fn roc_weights_two_criteria() {
    let weights = derive_roc_weights(&["quality".to_string(), "cost".to_string()]);
    assert_within(weights["quality"], 0.75, 1e-12);
    assert_within(weights["cost"], 0.25, 1e-12);
}

#[test]
fn roc_weights_empty_order() {
    let weights = derive_roc_weights(&[]);
    assert!(weights.is_empty());
}

#[test]
fn roc_weights_decreasing_and_positive() {
    let names = criteria_names(7);
    let weights = derive_roc_weights(&names);
    for pair in names.windows(2) {
        assert!(
            weights[&pair[0]] > weights[&pair[1]],
            "weight of {} should exceed weight of {}",
            pair[0],
            pair[1]
        );
    }
    assert!(names.iter().all(|n| weights[n] > 0.0));
}

#[test]
fn roc_weights_are_bitwise_reproducible() {
    // The map iteration order differs between instances; the normalization
    // must not, down to the last bit.
    let names = criteria_names(13);
    let first = derive_roc_weights(&names);
    let second = derive_roc_weights(&names);
    for name in names.iter() {
        assert_eq!(
            first[name].to_bits(),
            second[name].to_bits(),
            "weight of {} differs between two identical derivations",
            name
        );
    }
}

#[test]
fn ranks_cheaper_better_alternative_first() {
    let problem = cost_quality_problem();
    let order = vec!["quality".to_string(), "cost".to_string()];
    let results = run_ranking_analysis(&problem, &order).unwrap();

    assert_eq!(results[0].alternative, "B");
    assert_eq!(results[0].rank, 1);
    assert_eq!(results[1].alternative, "A");
    assert_eq!(results[1].rank, 2);
    // B dominates A on both criteria, so it sits exactly on the ideal point.
    assert_within(results[0].preference, 1.0, 1e-12);
    assert_within(results[1].preference, 0.0, 1e-12);
}

#[test]
fn single_alternative_gets_rank_one_and_zero_preference() {
    let problem = DecisionProblem {
        alternatives: vec!["only".to_string()],
        criteria: vec![Criterion {
            name: "c0".to_string(),
            polarity: CriterionPolarity::Benefit,
        }],
        values: vec![vec![42.0]],
    };
    let results = run_ranking_analysis(&problem, &criteria_names(1)).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rank, 1);
    // The single alternative defines both ideals, so both distances are zero
    // and the zero-total-distance fallback applies.
    assert_eq!(results[0].preference, 0.0);
}

#[test]
fn zero_column_does_not_produce_nan() {
    let problem = DecisionProblem {
        alternatives: vec!["A".to_string(), "B".to_string()],
        criteria: vec![
            Criterion {
                name: "c0".to_string(),
                polarity: CriterionPolarity::Benefit,
            },
            Criterion {
                name: "c1".to_string(),
                polarity: CriterionPolarity::Benefit,
            },
        ],
        values: vec![vec![0.0, 3.0], vec![0.0, 7.0]],
    };
    let results = run_ranking_analysis(&problem, &criteria_names(2)).unwrap();
    assert!(results.iter().all(|r| r.preference.is_finite()));
    assert_eq!(results[0].alternative, "B");
    assert_within(results[0].preference, 1.0, 1e-12);
    assert_within(results[1].preference, 0.0, 1e-12);
}

#[test]
fn equal_scores_keep_input_order() {
    let problem = DecisionProblem {
        alternatives: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        criteria: vec![
            Criterion {
                name: "c0".to_string(),
                polarity: CriterionPolarity::Benefit,
            },
            Criterion {
                name: "c1".to_string(),
                polarity: CriterionPolarity::Benefit,
            },
        ],
        // A and C are identical and score below B.
        values: vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![1.0, 1.0]],
    };
    let results = run_ranking_analysis(&problem, &criteria_names(2)).unwrap();
    assert_eq!(results[0].alternative, "B");
    assert_eq!(results[1].alternative, "A");
    assert_eq!(results[2].alternative, "C");
    assert_eq!(results[1].preference, results[2].preference);
    assert_eq!(
        results.iter().map(|r| r.rank).collect::<Vec<u32>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn missing_weight_is_fatal() {
    let problem = cost_quality_problem();
    // The priority order omits the cost criterion.
    let res = run_ranking_analysis(&problem, &["quality".to_string()]);
    assert_eq!(
        res,
        Err(RankingErrors::MissingWeight {
            criterion: "cost".to_string()
        })
    );
}

#[test]
fn nan_weight_is_fatal() {
    let problem = cost_quality_problem();
    let mut weights = std::collections::HashMap::new();
    weights.insert("cost".to_string(), f64::NAN);
    weights.insert("quality".to_string(), 0.5);
    let res = run_topsis(&problem, &weights);
    assert_eq!(
        res,
        Err(RankingErrors::InvalidWeight {
            criterion: "cost".to_string()
        })
    );
}

#[test]
fn infinite_weight_is_fatal() {
    let problem = cost_quality_problem();
    let mut weights = std::collections::HashMap::new();
    weights.insert("cost".to_string(), f64::INFINITY);
    weights.insert("quality".to_string(), 0.5);
    let res = run_topsis(&problem, &weights);
    assert_eq!(
        res,
        Err(RankingErrors::InvalidWeight {
            criterion: "cost".to_string()
        })
    );
}

#[test]
fn shape_errors_are_reported() {
    let mut problem = cost_quality_problem();
    problem.values[1] = vec![5.0];
    let order = vec!["quality".to_string(), "cost".to_string()];
    assert_eq!(
        run_ranking_analysis(&problem, &order),
        Err(RankingErrors::JaggedMatrix {
            row: 1,
            expected: 2,
            found: 1
        })
    );

    let mut problem = cost_quality_problem();
    problem.values.pop();
    assert_eq!(
        run_ranking_analysis(&problem, &order),
        Err(RankingErrors::RowCountMismatch {
            expected: 2,
            found: 1
        })
    );

    let mut problem = cost_quality_problem();
    problem.alternatives.clear();
    assert_eq!(
        run_ranking_analysis(&problem, &order),
        Err(RankingErrors::EmptyAlternatives)
    );
}

#[test]
fn non_finite_value_is_fatal() {
    let mut problem = cost_quality_problem();
    problem.values[0][1] = f64::INFINITY;
    let order = vec!["quality".to_string(), "cost".to_string()];
    assert_eq!(
        run_ranking_analysis(&problem, &order),
        Err(RankingErrors::NonFiniteValue { row: 0, column: 1 })
    );
}

prop_compose! {
    fn problems()(m in 1usize..8, n in 1usize..6)(
        rows in prop::collection::vec(prop::collection::vec(-1000.0f64..1000.0, n), m),
        polarities in prop::collection::vec(proptest::bool::ANY, n),
        m in proptest::strategy::Just(m),
        n in proptest::strategy::Just(n),
    ) -> DecisionProblem {
        DecisionProblem {
            alternatives: (0..m).map(|i| format!("alt{}", i)).collect(),
            criteria: (0..n)
                .map(|j| Criterion {
                    name: format!("c{}", j),
                    polarity: if polarities[j] {
                        CriterionPolarity::Benefit
                    } else {
                        CriterionPolarity::Cost
                    },
                })
                .collect(),
            values: rows,
        }
    }
}

proptest! {
    #[test]
    fn roc_weights_sum_to_one(n in 1usize..40) {
        let weights = derive_roc_weights(&criteria_names(n));
        let total: f64 = weights.values().sum();
        prop_assert!((total - 1.0).abs() <= 1e-9);
    }

    #[test]
    fn scores_bounded_and_ranks_form_a_permutation(problem in problems()) {
        let order: Vec<String> = problem.criteria.iter().map(|c| c.name.clone()).collect();
        let results = run_ranking_analysis(&problem, &order).unwrap();
        prop_assert_eq!(results.len(), problem.alternatives.len());
        for r in results.iter() {
            prop_assert!((0.0..=1.0).contains(&r.preference));
        }
        let mut ranks: Vec<u32> = results.iter().map(|r| r.rank).collect();
        ranks.sort_unstable();
        let expected: Vec<u32> = (1..=results.len() as u32).collect();
        prop_assert_eq!(ranks, expected);
    }

    #[test]
    fn ranking_is_deterministic(problem in problems()) {
        let order: Vec<String> = problem.criteria.iter().map(|c| c.name.clone()).collect();
        let first = run_ranking_analysis(&problem, &order).unwrap();
        let second = run_ranking_analysis(&problem, &order).unwrap();
        prop_assert_eq!(first, second);
    }
}
