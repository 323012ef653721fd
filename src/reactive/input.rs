//! Input sources: percentage variables mirrored across several text fields, and the
//! exclusive three-way test-result selector.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use super::{Callback, Propagation, Source, Subscribers};
use crate::choice::TernaryChoice;
use crate::percentage::Percentage;

/// One physical representation of a percentage: the text it shows and the last value
/// committed to it.
///
/// Rejected text never changes the committed value, so a field can show `5.` while
/// still holding the `50` the graph was computed from.
#[derive(Debug)]
pub struct PercentageField {
    text: RefCell<String>,
    committed: Cell<Option<Percentage>>,
}

impl PercentageField {
    /// A field showing `text`; it holds a value only if the text passes [`Percentage::parse`].
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            committed: Cell::new(Percentage::parse(&text)),
            text: RefCell::new(text),
        }
    }

    /// A field showing `value`, or empty when absent.
    pub fn holding(value: Option<Percentage>) -> Self {
        Self {
            text: RefCell::new(value.map(|p| p.to_string()).unwrap_or_default()),
            committed: Cell::new(value),
        }
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn value(&self) -> Option<Percentage> {
        self.committed.get()
    }

    fn write(&self, value: Percentage) {
        *self.text.borrow_mut() = value.to_string();
        self.committed.set(Some(value));
    }

    fn replace_text(&self, raw: &str) {
        let mut text = self.text.borrow_mut();
        text.clear();
        text.push_str(raw);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// Text passed the lexical rule; mirrors were updated and subscribers notified.
    Applied(Percentage),
    /// Text is an in-progress or malformed entry; only the edited field changed.
    Ignored,
}

/// A logical percentage input backed by one or more mirrored fields.
pub struct PercentageVariable {
    key: &'static str,
    fields: Vec<PercentageField>,
    subscribers: Subscribers<Option<Percentage>>,
}

impl PercentageVariable {
    /// Fields are read in the order given here.
    pub fn new<I, S>(key: &'static str, texts: I) -> Rc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rc::new(Self {
            key,
            fields: texts.into_iter().map(PercentageField::new).collect(),
            subscribers: Subscribers::new(key),
        })
    }

    /// `count` fields all holding `initial` (or empty when absent).
    pub fn mirrored(key: &'static str, count: usize, initial: Option<Percentage>) -> Rc<Self> {
        Rc::new(Self {
            key,
            fields: (0..count).map(|_| PercentageField::holding(initial)).collect(),
            subscribers: Subscribers::new(key),
        })
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn fields(&self) -> &[PercentageField] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Writes `value` into every field and notifies once.
    pub fn set(&self, value: Percentage) {
        let _pass = Propagation::begin(self.key);
        for field in &self.fields {
            field.write(value);
        }
        self.subscribers.notify(&Some(value));
    }

    /// A user edit of field `index`. Returns `None` if there is no such field.
    pub fn edit(&self, index: usize, raw: &str) -> Option<EditOutcome> {
        let field = self.fields.get(index)?;
        let _pass = Propagation::begin(self.key);
        field.replace_text(raw);

        let Some(value) = Percentage::parse(raw) else {
            debug!(input = self.key, field = index, text = raw, "edit ignored");
            return Some(EditOutcome::Ignored);
        };

        field.committed.set(Some(value));
        for (i, other) in self.fields.iter().enumerate() {
            if i != index {
                other.write(value);
            }
        }
        debug!(input = self.key, field = index, value = value.get(), "edit applied");
        self.subscribers.notify(&Some(value));
        Some(EditOutcome::Applied(value))
    }
}

impl Source for PercentageVariable {
    type Value = Option<Percentage>;

    /// First field holding a committed percentage, in registration order.
    fn value(&self) -> Option<Percentage> {
        self.fields.iter().find_map(PercentageField::value)
    }

    fn on_change(&self, callback: Callback<Option<Percentage>>) {
        self.subscribers.push(callback);
    }
}

pub struct TernaryVariable {
    key: &'static str,
    selected: Cell<TernaryChoice>,
    subscribers: Subscribers<TernaryChoice>,
}

impl TernaryVariable {
    pub fn new(key: &'static str, initial: TernaryChoice) -> Rc<Self> {
        Rc::new(Self {
            key,
            selected: Cell::new(initial),
            subscribers: Subscribers::new(key),
        })
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Selects `choice`; notifies only when the selection actually changes.
    pub fn select(&self, choice: TernaryChoice) -> bool {
        let _pass = Propagation::begin(self.key);
        if self.selected.replace(choice) == choice {
            return false;
        }
        debug!(input = self.key, choice = %choice, "selection changed");
        self.subscribers.notify(&choice);
        true
    }
}

impl Source for TernaryVariable {
    type Value = TernaryChoice;

    fn value(&self) -> TernaryChoice {
        self.selected.get()
    }

    fn on_change(&self, callback: Callback<TernaryChoice>) {
        self.subscribers.push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_skips_invalid_fields() {
        let var = PercentageVariable::new("x", ["", "abc", "0", "40"]);
        assert_eq!(var.value(), Percentage::new(0.0));
    }

    #[test]
    fn all_invalid_reads_absent() {
        let var = PercentageVariable::new("x", ["", "150"]);
        assert_eq!(var.value(), None);
    }

    #[test]
    fn rejected_text_keeps_committed_value() {
        let var = PercentageVariable::mirrored("x", 1, Percentage::new(50.0));
        for raw in ["", "5.", "100", "1e1", " 5", "-3"] {
            assert_eq!(var.edit(0, raw), Some(EditOutcome::Ignored));
            assert_eq!(var.fields()[0].text(), raw);
            assert_eq!(var.value(), Percentage::new(50.0), "after {:?}", raw);
        }
    }

    #[test]
    fn holding_hundred_reads_hundred() {
        let var = PercentageVariable::mirrored("x", 2, Some(Percentage::HUNDRED));
        assert_eq!(var.value(), Some(Percentage::HUNDRED));
        assert_eq!(var.fields()[1].text(), "100");
    }

    #[test]
    fn reselecting_is_not_a_change() {
        let var = TernaryVariable::new("t", TernaryChoice::Unknown);
        assert!(!var.select(TernaryChoice::Unknown));
        assert!(var.select(TernaryChoice::Positive));
        assert_eq!(var.value(), TernaryChoice::Positive);
    }
}
