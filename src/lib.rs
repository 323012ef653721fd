//! Reactive Bayesian calculator.
//!
//! Three percentage inputs and a test-result selector feed a fixed DAG of derivation
//! nodes ([`graph`]). Every input change propagates synchronously to the nodes and
//! their display sinks before the setter returns.

pub mod choice;
pub mod cli;
pub mod config;
pub mod formulas;
pub mod graph;
pub mod io;
pub mod percentage;
pub mod reactive;
pub mod schema;
pub mod session;
pub mod sink;

pub use choice::TernaryChoice;
pub use config::Config;
pub use graph::{assemble, CalculatorGraph, EnvironmentReady, Inputs, Snapshot};
pub use percentage::Percentage;
pub use session::{Edit, Session};
