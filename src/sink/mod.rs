//! One-way consumers of node values. Sinks never write back into the graph.

pub mod display;
pub mod markers;

pub use display::{format_fixed, NumericDisplay};
pub use markers::{marker_target, MarkerStrip};
