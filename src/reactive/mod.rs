//! Push-based reactive primitives.
//!
//! Every value holder in the graph implements [`Source`]: a current value plus an
//! ordered list of change callbacks. Propagation is synchronous and depth-first: a
//! setter returns only after every reachable subscriber has run. Subscribers must not
//! write back into the graph while they are being notified: every input setter opens a
//! [`Propagation`] pass for the thread, and a second setter called before that pass
//! ends panics, whichever input it targets.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub mod derived;
pub mod input;

pub use derived::{derive1, derive2, derive3, derive4, Derived};
pub use input::{EditOutcome, PercentageField, PercentageVariable, TernaryVariable};

pub type Callback<T> = Box<dyn FnMut(&T)>;

pub trait Source {
    type Value: Clone + 'static;

    fn value(&self) -> Self::Value;

    /// Registers `callback`; it runs after every change, in registration order.
    fn on_change(&self, callback: Callback<Self::Value>);
}

impl<S: Source + ?Sized> Source for Rc<S> {
    type Value = S::Value;

    fn value(&self) -> Self::Value {
        (**self).value()
    }

    fn on_change(&self, callback: Callback<Self::Value>) {
        (**self).on_change(callback)
    }
}

thread_local! {
    static PROPAGATING: Cell<Option<&'static str>> = const { Cell::new(None) };
}

/// Marks a write to an input as running. At most one pass is open per thread; it
/// closes when the guard drops, including during unwinding.
#[must_use]
pub(crate) struct Propagation(());

impl Propagation {
    pub(crate) fn begin(input: &'static str) -> Self {
        PROPAGATING.with(|running| {
            if let Some(origin) = running.get() {
                panic!(
                    "{}: re-entrant write while propagation from '{}' is still running",
                    input, origin
                );
            }
            running.set(Some(input));
        });
        Propagation(())
    }
}

impl Drop for Propagation {
    fn drop(&mut self) {
        PROPAGATING.with(|running| running.set(None));
    }
}

/// Ordered, owned callback list with a re-entrancy guard.
pub struct Subscribers<T> {
    label: &'static str,
    callbacks: RefCell<Vec<Callback<T>>>,
    notifying: Cell<bool>,
}

impl<T> Subscribers<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            callbacks: RefCell::new(Vec::new()),
            notifying: Cell::new(false),
        }
    }

    pub fn push(&self, callback: Callback<T>) {
        assert!(
            !self.notifying.get(),
            "{}: subscribed from inside its own change notification",
            self.label
        );
        self.callbacks.borrow_mut().push(callback);
    }

    pub fn notify(&self, value: &T) {
        assert!(
            !self.notifying.get(),
            "{}: re-entrant write while propagation is still running",
            self.label
        );
        self.notifying.set(true);
        for callback in self.callbacks.borrow_mut().iter_mut() {
            callback(value);
        }
        self.notifying.set(false);
    }

    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
