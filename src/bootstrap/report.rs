use crate::EXPECTED;
use std::fmt::Display;
use std::fmt::Formatter;

/// Outcome of the post-execution catalog check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    found: Vec<String>,
}

impl Report {
    pub fn found(&self) -> &[String] {
        &self.found
    }
    pub fn missing(&self) -> Vec<&'static str> {
        EXPECTED
            .into_iter()
            .filter(|t| !self.found.iter().any(|f| f == t))
            .collect()
    }
    pub fn complete(&self) -> bool {
        self.missing().is_empty()
    }
    /// Warning line naming the absent tables, if any.
    pub fn shortfall(&self) -> Option<String> {
        match self.missing() {
            missing if missing.is_empty() => None,
            missing => Some(format!("tables not present: {}", missing.join(", "))),
        }
    }
}

impl From<Vec<String>> for Report {
    fn from(mut found: Vec<String>) -> Self {
        found.sort();
        found.dedup();
        Self { found }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.found.join(", "))
    }
}
