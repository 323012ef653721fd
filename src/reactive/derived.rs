//! Derivation nodes: cached pure functions of upstream sources.
//!
//! A node seeds a fixed slot tuple from its dependencies at construction, then
//! subscribes to each dependency at that dependency's slot index. A change updates the
//! one slot in place, recomputes from the whole tuple and rebroadcasts. There is no
//! cross-graph batching: when one input reaches a node along two paths the node
//! recomputes and notifies once per path, so subscribers may observe transient values
//! before the last notification of a pass. Values read after the setter returns are
//! always consistent with the current inputs.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::{Callback, Source, Subscribers};

pub struct Derived<T> {
    label: &'static str,
    value: RefCell<T>,
    subscribers: Subscribers<T>,
    recomputes: Cell<u64>,
}

impl<T: Clone + fmt::Debug + 'static> Derived<T> {
    fn new(label: &'static str, initial: T) -> Self {
        trace!(node = label, value = ?initial, "node seeded");
        Self {
            label,
            value: RefCell::new(initial),
            subscribers: Subscribers::new(label),
            recomputes: Cell::new(0),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Number of recomputations since construction, excluding the seed.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn settle(&self, next: T) {
        self.recomputes.set(self.recomputes.get() + 1);
        trace!(node = self.label, value = ?next, "node recomputed");
        *self.value.borrow_mut() = next.clone();
        self.subscribers.notify(&next);
    }
}

impl<T: Clone + fmt::Debug + 'static> Source for Derived<T> {
    type Value = T;

    fn value(&self) -> T {
        self.value.borrow().clone()
    }

    fn on_change(&self, callback: Callback<T>) {
        self.subscribers.push(callback);
    }
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("label", &self.label)
            .field("value", &self.value.borrow())
            .finish()
    }
}

macro_rules! derive_n {
    ($(#[$doc:meta])* $name:ident, $($dep:ident: $src:ident<$ty:ident> => $idx:tt),+) => {
        $(#[$doc])*
        pub fn $name<$($src,)+ $($ty,)+ T, F>(
            label: &'static str,
            $($dep: &$src,)+
            f: F,
        ) -> Rc<Derived<T>>
        where
            $($src: Source<Value = $ty> + ?Sized,)+
            $($ty: Clone + 'static,)+
            T: Clone + fmt::Debug + 'static,
            F: Fn($(&$ty),+) -> T + 'static,
        {
            let slots = Rc::new(RefCell::new(($($dep.value(),)+)));
            let compute = Rc::new(move |s: &($($ty,)+)| f($(&s.$idx),+));
            let initial = {
                let s = slots.borrow();
                compute(&*s)
            };
            let node = Rc::new(Derived::new(label, initial));
            $(
                {
                    let slots = Rc::clone(&slots);
                    let compute = Rc::clone(&compute);
                    let node = Rc::clone(&node);
                    $dep.on_change(Box::new(move |changed: &$ty| {
                        let next = {
                            let mut s = slots.borrow_mut();
                            s.$idx = changed.clone();
                            compute(&*s)
                        };
                        node.settle(next);
                    }));
                }
            )+
            node
        }
    };
}

derive_n!(
    /// Node over one dependency.
    derive1,
    a: SA<A> => 0
);
derive_n!(
    /// Node over two dependencies, slots in argument order.
    derive2,
    a: SA<A> => 0,
    b: SB<B> => 1
);
derive_n!(
    /// Node over three dependencies, slots in argument order.
    derive3,
    a: SA<A> => 0,
    b: SB<B> => 1,
    c: SC<C> => 2
);
derive_n!(
    /// Node over four dependencies, slots in argument order.
    derive4,
    a: SA<A> => 0,
    b: SB<B> => 1,
    c: SC<C> => 2,
    d: SD<D> => 3
);
