use std::{fmt::Display, ops::Deref, str::FromStr};

use anyhow::anyhow;

/// A single value entered for a metric. Only finite numbers are accepted, since the store is JSON
/// and the graph needs real coordinates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Measurement(f64);

impl Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Measurement {
    pub fn new_opt(value: f64) -> Option<Measurement> {
        if value.is_finite() {
            Some(Measurement(value))
        } else {
            None
        }
    }
}

impl FromStr for Measurement {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let v = s.parse::<f64>()?;
        Measurement::new_opt(v).ok_or_else(|| anyhow!("Can't use {s} as a measurement"))
    }
}

impl Deref for Measurement {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
