//! Shared error type for the core crate.

use std::fmt;

use thiserror::Error;

use crate::validation::BlueprintIssue;

pub type Result<T> = std::result::Result<T, Error>;

/// Structured validation issues, rendered one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSet(pub Vec<BlueprintIssue>);

impl fmt::Display for IssueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid blueprint:\n{0}")]
    InvalidBlueprint(IssueSet),

    #[error("string-mirror conversion failed: {0}")]
    Mirror(String),
}
