use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::choice::TernaryChoice;
use crate::config::Config;
use crate::graph::{assemble, CalculatorGraph, EnvironmentReady, Inputs, PercentageKey};
use crate::reactive::{EditOutcome, Source};

/// One user interaction with the inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Text typed into representation `field` of a percentage input.
    Type {
        input: PercentageKey,
        field: usize,
        text: String,
    },
    Select(TernaryChoice),
}

impl Edit {
    pub fn describe(&self) -> String {
        match self {
            Edit::Type { input, field, text } => format!("{}.{} '{}'", input, field, text),
            Edit::Select(choice) => format!("test-result {}", choice),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Applied,
    /// Text failed the lexical rule and was withheld from the graph.
    Ignored,
    /// Selection already held that value.
    Unchanged,
}

impl StepStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Applied => "applied",
            StepStatus::Ignored => "ignored",
            StepStatus::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Step {
    pub edit: Edit,
    pub status: StepStatus,
    /// Every value the condition-probability node broadcast while the edit propagated.
    pub broadcasts: Vec<f64>,
}

/// A running calculator: the assembled graph plus what the shell observed of it.
pub struct Session {
    pub config: Config,
    pub graph: CalculatorGraph,
    pub steps: Vec<Step>,
    pub warnings: Vec<String>,
    broadcasts: Rc<RefCell<Vec<f64>>>,
}

impl Session {
    pub fn start(config: Config, ready: EnvironmentReady) -> Self {
        let graph = assemble(Inputs::from_config(&config), ready);

        let broadcasts = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&broadcasts);
        graph
            .nodes
            .condition_probability
            .on_change(Box::new(move |value: &f64| recorder.borrow_mut().push(*value)));

        Self {
            config,
            graph,
            steps: Vec::new(),
            warnings: Vec::new(),
            broadcasts,
        }
    }

    pub fn apply(&mut self, edit: Edit) -> Result<&Step> {
        self.broadcasts.borrow_mut().clear();
        let status = match &edit {
            Edit::Type { input, field, text } => {
                let variable = self.graph.inputs.percentage(*input);
                match variable.edit(*field, text) {
                    Some(EditOutcome::Applied(_)) => StepStatus::Applied,
                    Some(EditOutcome::Ignored) => StepStatus::Ignored,
                    None => bail!(
                        "{} has {} representation(s); there is no field {}",
                        input,
                        variable.field_count(),
                        field
                    ),
                }
            }
            Edit::Select(choice) => {
                if self.graph.inputs.test_result.select(*choice) {
                    StepStatus::Applied
                } else {
                    StepStatus::Unchanged
                }
            }
        };

        if status == StepStatus::Ignored {
            let msg = format!("ignored edit {}: not a percentage", edit.describe());
            warn!(edit = %edit.describe(), "edit withheld from graph");
            self.warnings.push(msg);
        }

        let broadcasts = std::mem::take(&mut *self.broadcasts.borrow_mut());
        info!(
            edit = %edit.describe(),
            status = ?status,
            broadcasts = broadcasts.len(),
            condition_probability = self.graph.nodes.condition_probability.value(),
            "edit processed"
        );
        let index = self.steps.len();
        self.steps.push(Step {
            edit,
            status,
            broadcasts,
        });
        Ok(&self.steps[index])
    }

    pub fn input_values(&self) -> InputValues {
        let inputs = &self.graph.inputs;
        InputValues {
            sensitivity: inputs.sensitivity.value().map(f64::from),
            specificity: inputs.specificity.value().map(f64::from),
            base_rate: inputs.base_rate.value().map(f64::from),
            test_result: inputs.test_result.value(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputValues {
    pub sensitivity: Option<f64>,
    pub specificity: Option<f64>,
    pub base_rate: Option<f64>,
    pub test_result: TernaryChoice,
}
