//! Structural checks on a state machine graph

use std::fmt;

/// A single structural problem found by [`super::StateMachine::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Several states share a name
    DuplicateStateName {
        /// The shared name
        name: String,
        /// How many states use it
        count: usize,
    },
    /// Several transitions share a name
    DuplicateTransitionName {
        /// The shared name
        name: String,
        /// How many transitions use it
        count: usize,
    },
    /// A non-initial state that no other state leads to
    ///
    /// Self-loops do not count as incoming, so a state entered only from
    /// itself is reported.
    IsolatedState {
        /// The unreachable state's name
        name: String,
    },
    /// The final state has a way out
    FinalStateExit {
        /// Final state name
        state: String,
        /// Offending transition
        transition: String,
        /// Where it leads
        target: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateStateName { name, count } => {
                write!(f, "duplicate state name '{name}' used by {count} states")
            }
            Self::DuplicateTransitionName { name, count } => {
                write!(f, "duplicate transition name '{name}' used by {count} transitions")
            }
            Self::IsolatedState { name } => {
                write!(f, "state '{name}' has no incoming transitions")
            }
            Self::FinalStateExit {
                state,
                transition,
                target,
            } => write!(
                f,
                "final state '{state}' has outgoing transition '{transition}' to '{target}'"
            ),
        }
    }
}

/// Every finding from one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    machine: String,
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub(super) fn new(machine: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self {
            machine: machine.into(),
            issues,
        }
    }

    /// Whether no issues were found
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Findings in check order
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Human-readable summary listing every finding, one per line
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The `(success, message)` pair
    pub fn into_parts(self) -> (bool, String) {
        (self.is_valid(), self.message())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "State machine '{}' is valid", self.machine);
        }
        write!(
            f,
            "State machine '{}' has {} problem(s):",
            self.machine,
            self.issues.len()
        )?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}
