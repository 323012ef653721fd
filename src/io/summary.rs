use crate::session::Session;
use crate::sink::MarkerStrip;

const MARKER_GLYPH: char = '#';

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn marker_row(label: &str, value: f64, strip: &MarkerStrip) -> String {
    let glyphs: String = std::iter::repeat(MARKER_GLYPH).take(strip.len()).collect();
    format!("{:<3} {:>6.2} {}\n", label, value, glyphs)
}

/// Text rendering of the calculator: inputs, the three displays and the marker rows.
pub fn format_summary(session: &Session) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let inputs = session.input_values();
    let graph = &session.graph;
    let snapshot = graph.snapshot();

    let mut out = String::new();
    out.push_str(&format!("condprob v{}\n", version));
    out.push_str(&format!(
        "Inputs: sensitivity={} specificity={} base-rate={} test-result={}\n",
        optional(inputs.sensitivity),
        optional(inputs.specificity),
        optional(inputs.base_rate),
        inputs.test_result
    ));
    out.push_str(&format!(
        "Condition probability: {}\n",
        graph.displays.condition_probability.text()
    ));
    out.push_str(&format!("PPV: {}\n", graph.displays.ppv.text()));
    out.push_str(&format!("NPV: {}\n", graph.displays.npv.text()));
    out.push_str(&marker_row("TP", snapshot.true_positive, &graph.markers.true_positive));
    out.push_str(&marker_row("FN", snapshot.false_negative, &graph.markers.false_negative));
    out.push_str(&marker_row("FP", snapshot.false_positive, &graph.markers.false_positive));
    out.push_str(&marker_row("TN", snapshot.true_negative, &graph.markers.true_negative));

    if snapshot.condition_probability.is_nan() {
        out.push_str("Note: condition probability is undefined for these inputs\n");
    }
    out
}
