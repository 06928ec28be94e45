use serde::{Deserialize, Serialize};
use std::fmt;

/// Pay-rate period inferred from salary text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Yearly,
    Monthly,
    Hourly,
    Daily,
}

impl Cadence {
    /// Returns the lowercase name used in exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yearly => "yearly",
            Self::Monthly => "monthly",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric compensation range recovered from free-form text
///
/// `min <= max` always holds; a single figure yields `min == max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
    pub cadence: Option<Cadence>,
    pub currency: Option<String>,
}

impl SalaryRange {
    /// Builds a range from the figures found in a salary string
    ///
    /// Returns `None` when `values` is empty.
    pub fn from_values(
        values: &[f64],
        cadence: Option<Cadence>,
        currency: Option<String>,
    ) -> Option<Self> {
        let min = values.iter().copied().reduce(f64::min)?;
        let max = if values.len() == 1 {
            min
        } else {
            values.iter().copied().reduce(f64::max)?
        };

        Some(Self {
            min,
            max,
            cadence,
            currency,
        })
    }
}
