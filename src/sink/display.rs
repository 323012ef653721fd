use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::reactive::Source;

/// Two-decimal rendering; NaN renders as `NaN`.
pub fn format_fixed(value: f64) -> String {
    format!("{:.2}", value)
}

/// Text view of a numeric node, refreshed on every broadcast including transient ones.
#[derive(Debug)]
pub struct NumericDisplay {
    name: &'static str,
    text: RefCell<String>,
    renders: Cell<usize>,
}

impl NumericDisplay {
    pub fn bind<S>(name: &'static str, node: &S) -> Rc<Self>
    where
        S: Source<Value = f64> + ?Sized,
    {
        let display = Rc::new(Self {
            name,
            text: RefCell::new(String::new()),
            renders: Cell::new(0),
        });
        display.render(node.value());
        let sink = Rc::clone(&display);
        node.on_change(Box::new(move |value: &f64| sink.render(*value)));
        display
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Renders performed so far, counting the one at bind time.
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    fn render(&self, value: f64) {
        *self.text.borrow_mut() = format_fixed(value);
        self.renders.set(self.renders.get() + 1);
    }
}
