//! Bayesian arithmetic for the calculator graph.
//!
//! All arguments and results are percentages. Zero denominators produce NaN and are
//! deliberately left unguarded; NaN then flows downstream like any other value.

use crate::choice::TernaryChoice;

pub fn true_positive(base_rate: f64, sensitivity: f64) -> f64 {
    base_rate * sensitivity / 100.0
}

pub fn false_negative(base_rate: f64, sensitivity: f64) -> f64 {
    base_rate * (100.0 - sensitivity) / 100.0
}

pub fn false_positive(base_rate: f64, specificity: f64) -> f64 {
    (100.0 - base_rate) * (100.0 - specificity) / 100.0
}

pub fn true_negative(base_rate: f64, specificity: f64) -> f64 {
    (100.0 - base_rate) * specificity / 100.0
}

pub fn positive_predictive_value(true_positive: f64, false_positive: f64) -> f64 {
    100.0 * true_positive / (true_positive + false_positive)
}

pub fn negative_predictive_value(true_negative: f64, false_negative: f64) -> f64 {
    100.0 * true_negative / (true_negative + false_negative)
}

/// Posterior probability of the condition given the selected test result.
pub fn condition_probability(
    test_result: TernaryChoice,
    base_rate: f64,
    ppv: f64,
    npv: f64,
) -> f64 {
    match test_result {
        TernaryChoice::Unknown => base_rate,
        TernaryChoice::Positive => ppv,
        TernaryChoice::Negative => 100.0 - npv,
    }
}
