use condprob::percentage::or_nan;
use condprob::reactive::{derive1, PercentageVariable};
use condprob::sink::MarkerStrip;
use condprob::Percentage;

fn pct(v: f64) -> Percentage {
    Percentage::new(v).unwrap()
}

#[test]
fn strip_tracks_node_in_single_steps() {
    let input = PercentageVariable::new("count", ["3"]);
    let node = derive1("count", &input, |v: &Option<Percentage>| or_nan(*v));
    let strip = MarkerStrip::bind("count", &node);
    assert_eq!(strip.len(), 3);

    input.set(pct(7.0));
    assert_eq!(strip.len(), 7);
    assert_eq!(strip.added(), 7);
    assert_eq!(strip.removed(), 0);

    input.set(pct(2.0));
    assert_eq!(strip.len(), 2);
    assert_eq!(strip.removed(), 5);
    // Oldest markers go first.
    assert_eq!(strip.marker_ids(), vec![5, 6]);

    input.set(pct(0.0));
    assert!(strip.is_empty());
    assert_eq!(strip.added() - strip.removed(), 0);
}

#[test]
fn fractional_counts_round_up() {
    let input = PercentageVariable::new("count", ["0.9"]);
    let node = derive1("count", &input, |v: &Option<Percentage>| or_nan(*v));
    let strip = MarkerStrip::bind("count", &node);
    assert_eq!(strip.len(), 1);

    input.set(pct(9.9));
    assert_eq!(strip.len(), 10);
}

#[test]
fn nan_leaves_markers_alone() {
    let input = PercentageVariable::new("count", ["4"]);
    let node = derive1("count", &input, |v: &Option<Percentage>| or_nan(*v));
    let strip = MarkerStrip::bind("count", &node);

    strip.reconcile(f64::NAN);
    assert_eq!(strip.len(), 4);
}
