use crate::choice::TernaryChoice;
use crate::percentage::Percentage;

pub const DEFAULT_MIRRORS: usize = 2;

/// Starting state for the inputs. Absent percentages start as empty fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub sensitivity: Option<Percentage>,
    pub specificity: Option<Percentage>,
    pub base_rate: Option<Percentage>,
    pub test_result: TernaryChoice,
    /// Representations per percentage input.
    pub mirrors: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sensitivity: Percentage::new(90.0),
            specificity: Percentage::new(90.0),
            base_rate: Percentage::new(1.0),
            test_result: TernaryChoice::Unknown,
            mirrors: DEFAULT_MIRRORS,
        }
    }
}
