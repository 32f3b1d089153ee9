use serde::Deserialize;
use std::fmt;

/// How many hourly samples make up the simulated year.
///
/// `Fixed365` always produces 365 * 24 samples, so in a leap year the grid
/// stops at Dec 30 23:00 while month slicing still uses the real calendar.
/// `Calendar` follows the true length of the year.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridMode {
    #[default]
    #[serde(rename(deserialize = "fixed365"))]
    Fixed365,
    #[serde(rename(deserialize = "calendar"))]
    Calendar,
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridMode::Fixed365 => write!(f, "fixed365"),
            GridMode::Calendar => write!(f, "calendar"),
        }
    }
}
