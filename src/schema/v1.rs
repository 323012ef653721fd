use serde::{Deserialize, Serialize};

use crate::choice::TernaryChoice;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsV1 {
    pub sensitivity: Option<f64>,
    pub specificity: Option<f64>,
    pub base_rate: Option<f64>,
    pub test_result: TernaryChoice,
    pub representations: usize,
}

/// Settled node values; undefined results are `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsV1 {
    pub true_positive: Option<f64>,
    pub false_negative: Option<f64>,
    pub false_positive: Option<f64>,
    pub true_negative: Option<f64>,
    pub ppv: Option<f64>,
    pub npv: Option<f64>,
    pub condition_probability: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaysV1 {
    pub condition_probability: String,
    pub ppv: String,
    pub npv: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkersV1 {
    pub true_positive: usize,
    pub false_negative: usize,
    pub false_positive: usize,
    pub true_negative: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepV1 {
    pub edit: String,
    pub status: String,
    pub broadcasts: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CondProbV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub inputs: InputsV1,
    pub results: ResultsV1,
    pub displays: DisplaysV1,
    pub markers: MarkersV1,
    pub steps: Vec<StepV1>,
    pub warnings: Vec<String>,
}
