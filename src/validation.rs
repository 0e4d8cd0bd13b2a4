//! Workload validation.
//!
//! Checks a workload before it is simulated. Detects:
//! - Duplicate pids
//! - Use of the reserved `IDLE` pid
//! - Processes that need no CPU time
//!
//! All problems are collected, not just the first.

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::models::ProcessSpec;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationErrorKind {
    /// Two processes share the same pid.
    DuplicatePid,
    /// A process uses the `IDLE` sentinel as its pid.
    ReservedPid,
    /// A process has a service time of zero.
    ZeroServiceTime,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a workload.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(processes: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for p in processes {
        if p.pid.is_idle() {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedPid,
                format!("Process uses the reserved IDLE pid ({})", p.pid.get()),
            ));
        } else if !seen.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", p.pid),
            ));
        }

        if p.service_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroServiceTime,
                format!("Process {} has zero service time", p.pid),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
