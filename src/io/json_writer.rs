use std::path::Path;

use anyhow::{Context, Result};

use crate::schema::v1::{CondProbV1, DisplaysV1, InputsV1, MarkersV1, ResultsV1, StepV1};
use crate::session::Session;

fn defined(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

pub fn build_report(session: &Session) -> CondProbV1 {
    let graph = &session.graph;
    let inputs = session.input_values();
    let snapshot = graph.snapshot();

    let steps = session
        .steps
        .iter()
        .map(|step| StepV1 {
            edit: step.edit.describe(),
            status: step.status.as_str().to_string(),
            broadcasts: step.broadcasts.iter().copied().map(defined).collect(),
        })
        .collect();

    CondProbV1 {
        tool: "condprob".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: "v1".to_string(),
        inputs: InputsV1 {
            sensitivity: inputs.sensitivity,
            specificity: inputs.specificity,
            base_rate: inputs.base_rate,
            test_result: inputs.test_result,
            representations: graph.inputs.base_rate.field_count(),
        },
        results: ResultsV1 {
            true_positive: defined(snapshot.true_positive),
            false_negative: defined(snapshot.false_negative),
            false_positive: defined(snapshot.false_positive),
            true_negative: defined(snapshot.true_negative),
            ppv: defined(snapshot.ppv),
            npv: defined(snapshot.npv),
            condition_probability: defined(snapshot.condition_probability),
        },
        displays: DisplaysV1 {
            condition_probability: graph.displays.condition_probability.text(),
            ppv: graph.displays.ppv.text(),
            npv: graph.displays.npv.text(),
        },
        markers: MarkersV1 {
            true_positive: graph.markers.true_positive.len(),
            false_negative: graph.markers.false_negative.len(),
            false_positive: graph.markers.false_positive.len(),
            true_negative: graph.markers.true_negative.len(),
        },
        steps,
        warnings: session.warnings.clone(),
    }
}

pub fn write_json(path: &Path, session: &Session) -> Result<()> {
    let report = build_report(session);
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
