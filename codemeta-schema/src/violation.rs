use std::fmt;

use thiserror::Error;

/// One step from a parent value to a child.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Key(String),
    Index(usize),
}

/// Where in the document a violation was found, rendered in path syntax,
/// e.g. `author[0].email`.
///
/// Orders keys lexicographically and indices numerically.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location(Vec<Step>);

impl Location {
    pub fn root() -> Self {
        Location(Vec::new())
    }

    pub fn key(&self, key: &str) -> Self {
        let mut steps = self.0.clone();
        steps.push(Step::Key(key.to_string()));
        Location(steps)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut steps = self.0.clone();
        steps.push(Step::Index(index));
        Location(steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, step) in self.0.iter().enumerate() {
            match step {
                Step::Key(key) if i == 0 => write!(f, "{}", key)?,
                Step::Key(key) => write!(f, ".{}", key)?,
                Step::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Violation {
    pub location: Location,
    pub message: String,
}

impl Violation {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Violation {
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// The document does not conform to the codemeta schema.
///
/// Carries every violation, sorted by location and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("document is not valid codemeta ({} violation(s)):\n{}", .violations.len(), render(.violations))]
pub struct ValidationFailed {
    pub violations: Vec<Violation>,
}

impl ValidationFailed {
    pub(crate) fn new(mut violations: Vec<Violation>) -> Self {
        violations.sort();
        violations.dedup();
        ValidationFailed { violations }
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  {}", v))
        .collect::<Vec<_>>()
        .join("\n")
}
