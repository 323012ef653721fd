use std::cell::RefCell;
use std::rc::Rc;

use condprob::reactive::{EditOutcome, PercentageVariable, Source};
use condprob::Percentage;

fn record(var: &PercentageVariable) -> Rc<RefCell<Vec<Option<Percentage>>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    var.on_change(Box::new(move |v: &Option<Percentage>| sink.borrow_mut().push(*v)));
    seen
}

fn texts(var: &PercentageVariable) -> Vec<String> {
    var.fields().iter().map(|f| f.text()).collect()
}

#[test]
fn edit_mirrors_and_notifies_once() {
    let var = PercentageVariable::new("sensitivity", ["10", "10", "10"]);
    let seen = record(&var);

    let outcome = var.edit(1, "42");
    assert_eq!(outcome, Some(EditOutcome::Applied(Percentage::new(42.0).unwrap())));
    assert_eq!(texts(&var), vec!["42", "42", "42"]);
    assert_eq!(*seen.borrow(), vec![Percentage::new(42.0)]);
    assert_eq!(var.value(), Percentage::new(42.0));
}

#[test]
fn edited_field_keeps_its_own_text() {
    let var = PercentageVariable::new("sensitivity", ["10", "10"]);
    var.edit(0, "05");
    assert_eq!(texts(&var), vec!["05", "5"]);
    assert_eq!(var.value(), Percentage::new(5.0));
}

#[test]
fn invalid_edit_is_silent() {
    let var = PercentageVariable::new("base-rate", ["10", "10"]);
    let seen = record(&var);

    assert_eq!(var.edit(0, ""), Some(EditOutcome::Ignored));
    assert_eq!(var.edit(0, "1e5"), Some(EditOutcome::Ignored));
    assert_eq!(texts(&var), vec!["1e5", "10"]);
    assert!(seen.borrow().is_empty());

    assert_eq!(var.edit(0, ""), Some(EditOutcome::Ignored));
    // The emptied field still holds the last committed value.
    assert_eq!(var.value(), Percentage::new(10.0));
    assert_eq!(var.fields()[0].value(), Percentage::new(10.0));

    assert_eq!(var.edit(0, "7.5"), Some(EditOutcome::Applied(Percentage::new(7.5).unwrap())));
    assert_eq!(texts(&var), vec!["7.5", "7.5"]);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn set_writes_every_field() {
    let var = PercentageVariable::mirrored("specificity", 3, None);
    assert_eq!(var.value(), None);
    let seen = record(&var);

    var.set(Percentage::HUNDRED);
    assert_eq!(texts(&var), vec!["100", "100", "100"]);
    assert_eq!(var.value(), Some(Percentage::HUNDRED));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn missing_field_is_reported() {
    let var = PercentageVariable::new("sensitivity", ["10"]);
    assert_eq!(var.edit(3, "5"), None);
}
