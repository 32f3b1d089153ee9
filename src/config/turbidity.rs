use serde::Deserialize;

use super::ConfigError;

/// Typical clear atmosphere; 2-3 is very clean air, 4-6 industrial areas.
pub const DEFAULT_LINKE_TURBIDITY: f64 = 3.0;

/// Linke turbidity factor fed to the clear-sky model.
///
/// Either one value for the whole year or twelve monthly values (January
/// first). In JSON this is a bare number or an array of twelve numbers.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum LinkeTurbidity {
    Constant(f64),
    Monthly(Vec<f64>),
}

impl Default for LinkeTurbidity {
    fn default() -> Self {
        LinkeTurbidity::Constant(DEFAULT_LINKE_TURBIDITY)
    }
}

impl LinkeTurbidity {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values: &[f64] = match self {
            LinkeTurbidity::Constant(value) => std::slice::from_ref(value),
            LinkeTurbidity::Monthly(values) => {
                if values.len() != 12 {
                    return Err(ConfigError::TurbidityMonths(values.len()));
                }
                values
            }
        };

        match values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
            Some(bad) => Err(ConfigError::Turbidity(*bad)),
            None => Ok(()),
        }
    }

    /// Turbidity for a calendar month (1-12).
    pub fn for_month(&self, month: u32) -> f64 {
        match self {
            LinkeTurbidity::Constant(value) => *value,
            LinkeTurbidity::Monthly(values) => {
                let idx = (month.clamp(1, 12) - 1) as usize;
                values.get(idx).copied().unwrap_or(DEFAULT_LINKE_TURBIDITY)
            }
        }
    }
}
