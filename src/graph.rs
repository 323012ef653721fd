//! The fixed calculator topology and its one-shot assembly.
//!
//! ```text
//! base_rate, sensitivity  -> true_positive, false_negative
//! base_rate, specificity  -> false_positive, true_negative
//! true_positive, false_positive -> ppv
//! true_negative, false_negative -> npv
//! test_result, base_rate, ppv, npv -> condition_probability
//! ```
//!
//! `base_rate` reaches `condition_probability` along five paths, so one base-rate
//! change makes that node recompute five times. Intermediate broadcasts can be stale;
//! the value left after the setter returns always matches [`Snapshot::compute`].

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use anyhow::bail;
use serde::Serialize;
use tracing::{debug, info};

use crate::choice::TernaryChoice;
use crate::config::Config;
use crate::formulas;
use crate::percentage::{or_nan, Percentage};
use crate::reactive::{derive2, derive4, Derived, PercentageVariable, Source, TernaryVariable};
use crate::sink::{MarkerStrip, NumericDisplay};

/// Proof that the hosting environment is ready. Assembly consumes it, so each
/// signal builds at most one graph.
#[derive(Debug)]
pub struct EnvironmentReady(());

impl EnvironmentReady {
    pub fn signal() -> Self {
        Self(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PercentageKey {
    Sensitivity,
    Specificity,
    BaseRate,
}

impl PercentageKey {
    pub const ALL: [PercentageKey; 3] = [Self::Sensitivity, Self::Specificity, Self::BaseRate];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sensitivity => "sensitivity",
            Self::Specificity => "specificity",
            Self::BaseRate => "base-rate",
        }
    }
}

impl fmt::Display for PercentageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PercentageKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "sensitivity" => Ok(Self::Sensitivity),
            "specificity" => Ok(Self::Specificity),
            "base-rate" => Ok(Self::BaseRate),
            other => bail!("unknown percentage input '{}'", other),
        }
    }
}

pub struct Inputs {
    pub sensitivity: Rc<PercentageVariable>,
    pub specificity: Rc<PercentageVariable>,
    pub base_rate: Rc<PercentageVariable>,
    pub test_result: Rc<TernaryVariable>,
}

impl Inputs {
    pub fn from_config(config: &Config) -> Self {
        let mirrors = config.mirrors.max(1);
        Self {
            sensitivity: PercentageVariable::mirrored(
                PercentageKey::Sensitivity.as_str(),
                mirrors,
                config.sensitivity,
            ),
            specificity: PercentageVariable::mirrored(
                PercentageKey::Specificity.as_str(),
                mirrors,
                config.specificity,
            ),
            base_rate: PercentageVariable::mirrored(
                PercentageKey::BaseRate.as_str(),
                mirrors,
                config.base_rate,
            ),
            test_result: TernaryVariable::new("test-result", config.test_result),
        }
    }

    pub fn percentage(&self, key: PercentageKey) -> &Rc<PercentageVariable> {
        match key {
            PercentageKey::Sensitivity => &self.sensitivity,
            PercentageKey::Specificity => &self.specificity,
            PercentageKey::BaseRate => &self.base_rate,
        }
    }
}

pub struct Nodes {
    pub true_positive: Rc<Derived<f64>>,
    pub false_negative: Rc<Derived<f64>>,
    pub false_positive: Rc<Derived<f64>>,
    pub true_negative: Rc<Derived<f64>>,
    pub ppv: Rc<Derived<f64>>,
    pub npv: Rc<Derived<f64>>,
    pub condition_probability: Rc<Derived<f64>>,
}

pub struct Displays {
    pub condition_probability: Rc<NumericDisplay>,
    pub ppv: Rc<NumericDisplay>,
    pub npv: Rc<NumericDisplay>,
}

pub struct Markers {
    pub true_positive: Rc<MarkerStrip>,
    pub false_negative: Rc<MarkerStrip>,
    pub false_positive: Rc<MarkerStrip>,
    pub true_negative: Rc<MarkerStrip>,
}

pub struct CalculatorGraph {
    pub inputs: Inputs,
    pub nodes: Nodes,
    pub displays: Displays,
    pub markers: Markers,
}

/// Wires the inputs through the fixed topology and binds every sink.
///
/// Nodes and sinks are created in a fixed order, which fixes the order in which
/// subscribers run during propagation.
pub fn assemble(inputs: Inputs, _ready: EnvironmentReady) -> CalculatorGraph {
    let base_rate = &inputs.base_rate;

    let true_positive = derive2(
        "true_positive",
        base_rate,
        &inputs.sensitivity,
        |base: &Option<Percentage>, sens: &Option<Percentage>| {
            formulas::true_positive(or_nan(*base), or_nan(*sens))
        },
    );
    let false_negative = derive2(
        "false_negative",
        base_rate,
        &inputs.sensitivity,
        |base: &Option<Percentage>, sens: &Option<Percentage>| {
            formulas::false_negative(or_nan(*base), or_nan(*sens))
        },
    );
    let false_positive = derive2(
        "false_positive",
        base_rate,
        &inputs.specificity,
        |base: &Option<Percentage>, spec: &Option<Percentage>| {
            formulas::false_positive(or_nan(*base), or_nan(*spec))
        },
    );
    let true_negative = derive2(
        "true_negative",
        base_rate,
        &inputs.specificity,
        |base: &Option<Percentage>, spec: &Option<Percentage>| {
            formulas::true_negative(or_nan(*base), or_nan(*spec))
        },
    );

    let ppv = derive2("ppv", &true_positive, &false_positive, |tp: &f64, fp: &f64| {
        formulas::positive_predictive_value(*tp, *fp)
    });
    let npv = derive2("npv", &true_negative, &false_negative, |tn: &f64, fn_: &f64| {
        formulas::negative_predictive_value(*tn, *fn_)
    });

    let condition_probability = derive4(
        "condition_probability",
        &inputs.test_result,
        base_rate,
        &ppv,
        &npv,
        |choice: &TernaryChoice, base: &Option<Percentage>, ppv: &f64, npv: &f64| {
            formulas::condition_probability(*choice, or_nan(*base), *ppv, *npv)
        },
    );
    condition_probability.on_change(Box::new(|value: &f64| {
        if value.is_nan() {
            debug!("condition probability is undefined for the current inputs");
        }
    }));

    let displays = Displays {
        condition_probability: NumericDisplay::bind("condition_probability", &condition_probability),
        ppv: NumericDisplay::bind("ppv", &ppv),
        npv: NumericDisplay::bind("npv", &npv),
    };
    let markers = Markers {
        true_positive: MarkerStrip::bind("true_positive", &true_positive),
        false_negative: MarkerStrip::bind("false_negative", &false_negative),
        false_positive: MarkerStrip::bind("false_positive", &false_positive),
        true_negative: MarkerStrip::bind("true_negative", &true_negative),
    };

    let graph = CalculatorGraph {
        nodes: Nodes {
            true_positive,
            false_negative,
            false_positive,
            true_negative,
            ppv,
            npv,
            condition_probability,
        },
        inputs,
        displays,
        markers,
    };
    info!(
        mirrors = graph.inputs.base_rate.field_count(),
        condition_probability = graph.nodes.condition_probability.value(),
        "calculator graph assembled"
    );
    graph
}

impl CalculatorGraph {
    /// The values currently cached in the nodes.
    pub fn snapshot(&self) -> Snapshot {
        let n = &self.nodes;
        Snapshot {
            true_positive: n.true_positive.value(),
            false_negative: n.false_negative.value(),
            false_positive: n.false_positive.value(),
            true_negative: n.true_negative.value(),
            ppv: n.ppv.value(),
            npv: n.npv.value(),
            condition_probability: n.condition_probability.value(),
        }
    }

    /// Every node evaluated from scratch against the current input values.
    pub fn recompute(&self) -> Snapshot {
        Snapshot::compute(
            self.inputs.sensitivity.value(),
            self.inputs.specificity.value(),
            self.inputs.base_rate.value(),
            self.inputs.test_result.value(),
        )
    }

    pub fn is_settled(&self) -> bool {
        self.snapshot().matches(&self.recompute())
    }
}

/// Values of every derivation node at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub true_positive: f64,
    pub false_negative: f64,
    pub false_positive: f64,
    pub true_negative: f64,
    pub ppv: f64,
    pub npv: f64,
    pub condition_probability: f64,
}

impl Snapshot {
    pub fn compute(
        sensitivity: Option<Percentage>,
        specificity: Option<Percentage>,
        base_rate: Option<Percentage>,
        test_result: TernaryChoice,
    ) -> Self {
        let base = or_nan(base_rate);
        let sens = or_nan(sensitivity);
        let spec = or_nan(specificity);

        let true_positive = formulas::true_positive(base, sens);
        let false_negative = formulas::false_negative(base, sens);
        let false_positive = formulas::false_positive(base, spec);
        let true_negative = formulas::true_negative(base, spec);
        let ppv = formulas::positive_predictive_value(true_positive, false_positive);
        let npv = formulas::negative_predictive_value(true_negative, false_negative);
        Self {
            true_positive,
            false_negative,
            false_positive,
            true_negative,
            ppv,
            npv,
            condition_probability: formulas::condition_probability(test_result, base, ppv, npv),
        }
    }

    /// Field-wise equality where NaN matches NaN.
    pub fn matches(&self, other: &Snapshot) -> bool {
        self.fields()
            .iter()
            .zip(other.fields().iter())
            .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }

    pub fn fields(&self) -> [f64; 7] {
        [
            self.true_positive,
            self.false_negative,
            self.false_positive,
            self.true_negative,
            self.ppv,
            self.npv,
            self.condition_probability,
        ]
    }
}
