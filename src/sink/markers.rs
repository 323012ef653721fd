use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::trace;

use crate::reactive::Source;

/// Marker count a value reconciles to: markers are added while fewer than `value` and
/// removed while more, so positive fractions round up. NaN has no target.
pub fn marker_target(value: f64) -> Option<usize> {
    if value.is_nan() {
        return None;
    }
    if value <= 0.0 {
        return Some(0);
    }
    Some(value.ceil() as usize)
}

/// A row of discrete markers kept in step with a count node.
///
/// Markers are appended at the back and removed from the front, one at a time.
#[derive(Debug)]
pub struct MarkerStrip {
    name: &'static str,
    markers: RefCell<VecDeque<u64>>,
    next_id: Cell<u64>,
    added: Cell<usize>,
    removed: Cell<usize>,
}

impl MarkerStrip {
    pub fn bind<S>(name: &'static str, node: &S) -> Rc<Self>
    where
        S: Source<Value = f64> + ?Sized,
    {
        let strip = Rc::new(Self {
            name,
            markers: RefCell::new(VecDeque::new()),
            next_id: Cell::new(0),
            added: Cell::new(0),
            removed: Cell::new(0),
        });
        strip.reconcile(node.value());
        let sink = Rc::clone(&strip);
        node.on_change(Box::new(move |value: &f64| sink.reconcile(*value)));
        strip
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.markers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of the markers currently shown, oldest first.
    pub fn marker_ids(&self) -> Vec<u64> {
        self.markers.borrow().iter().copied().collect()
    }

    pub fn added(&self) -> usize {
        self.added.get()
    }

    pub fn removed(&self) -> usize {
        self.removed.get()
    }

    pub fn reconcile(&self, value: f64) {
        let Some(target) = marker_target(value) else {
            trace!(strip = self.name, "NaN count left markers untouched");
            return;
        };
        let mut markers = self.markers.borrow_mut();
        while markers.len() < target {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            markers.push_back(id);
            self.added.set(self.added.get() + 1);
        }
        while markers.len() > target {
            markers.pop_front();
            self.removed.set(self.removed.get() + 1);
        }
    }
}
