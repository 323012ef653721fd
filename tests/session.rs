use condprob::graph::{EnvironmentReady, PercentageKey};
use condprob::session::{Edit, Session, StepStatus};
use condprob::{Config, TernaryChoice};

fn typed(input: PercentageKey, field: usize, text: &str) -> Edit {
    Edit::Type {
        input,
        field,
        text: text.to_string(),
    }
}

#[test]
fn steps_record_status_and_broadcasts() {
    let mut session = Session::start(Config::default(), EnvironmentReady::signal());

    let step = session
        .apply(Edit::Select(TernaryChoice::Positive))
        .unwrap();
    assert_eq!(step.status, StepStatus::Applied);
    assert_eq!(step.broadcasts.len(), 1);

    let step = session
        .apply(Edit::Select(TernaryChoice::Positive))
        .unwrap();
    assert_eq!(step.status, StepStatus::Unchanged);
    assert!(step.broadcasts.is_empty());

    let step = session.apply(typed(PercentageKey::BaseRate, 1, "50")).unwrap();
    assert_eq!(step.status, StepStatus::Applied);
    assert_eq!(step.broadcasts.len(), 5);
    assert!((step.broadcasts[4] - 90.0).abs() < 1e-9);

    assert_eq!(session.steps.len(), 3);
    assert!(session.warnings.is_empty());
    assert!(session.graph.is_settled());
}

#[test]
fn ignored_edit_becomes_warning() {
    let mut session = Session::start(Config::default(), EnvironmentReady::signal());
    let before = session.input_values();
    let step = session
        .apply(typed(PercentageKey::Sensitivity, 0, "9."))
        .unwrap();
    assert_eq!(step.status, StepStatus::Ignored);
    assert!(step.broadcasts.is_empty());
    assert_eq!(session.warnings.len(), 1);
    assert!(session.warnings[0].contains("sensitivity.0"));
    assert_eq!(session.input_values(), before);
    assert!(session.graph.is_settled());
}

#[test]
fn rejected_hundred_does_not_reach_inputs() {
    let mut session = Session::start(Config::default(), EnvironmentReady::signal());
    session
        .apply(Edit::Select(TernaryChoice::Positive))
        .unwrap();
    for text in ["100", "1e1", " 5", "5."] {
        let step = session.apply(typed(PercentageKey::BaseRate, 0, text)).unwrap();
        assert_eq!(step.status, StepStatus::Ignored, "{:?}", text);
    }
    assert_eq!(session.input_values().base_rate, Some(1.0));
    assert!(session.graph.is_settled());
    assert_eq!(session.graph.displays.condition_probability.text(), "8.33");
    assert_eq!(session.warnings.len(), 4);
}

#[test]
fn unknown_representation_is_an_error() {
    let mut session = Session::start(
        Config {
            mirrors: 1,
            ..Config::default()
        },
        EnvironmentReady::signal(),
    );
    let err = session
        .apply(typed(PercentageKey::Specificity, 1, "10"))
        .unwrap_err();
    assert!(err.to_string().contains("no field 1"));
    assert!(session.steps.is_empty());
}

#[test]
fn input_values_reflect_fields() {
    let mut session = Session::start(
        Config {
            base_rate: None,
            ..Config::default()
        },
        EnvironmentReady::signal(),
    );
    assert_eq!(session.input_values().base_rate, None);
    session
        .apply(typed(PercentageKey::BaseRate, 0, "12.5"))
        .unwrap();
    let values = session.input_values();
    assert_eq!(values.base_rate, Some(12.5));
    assert_eq!(values.sensitivity, Some(90.0));
    assert_eq!(values.test_result, TernaryChoice::Unknown);
}
