use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::choice::TernaryChoice;
use crate::config::{Config, DEFAULT_MIRRORS};
use crate::percentage::Percentage;

#[derive(Debug, Parser)]
#[command(
    name = "condprob",
    version,
    about = "Condition probability from sensitivity, specificity and base rate"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate the calculator once for the given inputs.
    Calc(CalcArgs),
    /// Replay an edit script against a live calculator.
    Session(SessionArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    #[arg(long, value_parser = parse_percentage, help = "Sensitivity in [0, 100]")]
    pub sensitivity: Option<Percentage>,

    #[arg(long, value_parser = parse_percentage, help = "Specificity in [0, 100]")]
    pub specificity: Option<Percentage>,

    #[arg(long, value_parser = parse_percentage, help = "Base rate in [0, 100]")]
    pub base_rate: Option<Percentage>,

    #[arg(long, value_enum)]
    pub test_result: Option<TestResultArg>,

    #[arg(
        long,
        default_value_t = DEFAULT_MIRRORS,
        help = "Representations per percentage input"
    )]
    pub mirrors: usize,
}

#[derive(Debug, Args)]
pub struct CalcArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    #[arg(long, help = "Write a JSON report to this path")]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    #[arg(long, help = "Edit script to replay")]
    pub script: PathBuf,

    #[arg(long, help = "Write a JSON report to this path")]
    pub json: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = false,
        help = "Print every condition-probability broadcast, including transient ones"
    )]
    pub trace_glitches: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestResultArg {
    Unknown,
    Positive,
    Negative,
}

impl From<TestResultArg> for TernaryChoice {
    fn from(arg: TestResultArg) -> Self {
        match arg {
            TestResultArg::Unknown => TernaryChoice::Unknown,
            TestResultArg::Positive => TernaryChoice::Positive,
            TestResultArg::Negative => TernaryChoice::Negative,
        }
    }
}

impl InputArgs {
    /// Flags override the defaults; unset flags keep them.
    pub fn to_config(&self) -> Config {
        let defaults = Config::default();
        Config {
            sensitivity: self.sensitivity.or(defaults.sensitivity),
            specificity: self.specificity.or(defaults.specificity),
            base_rate: self.base_rate.or(defaults.base_rate),
            test_result: self
                .test_result
                .map(TernaryChoice::from)
                .unwrap_or(defaults.test_result),
            mirrors: self.mirrors,
        }
    }
}

fn parse_percentage(raw: &str) -> Result<Percentage, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    Percentage::new(value).ok_or_else(|| format!("{} is outside [0, 100]", value))
}
