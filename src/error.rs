//! Error types.

use thiserror::Error;

use crate::models::Pid;
use crate::validation::ValidationError;

/// Errors raised while configuring or constructing a policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// A time slice must be at least one cycle.
    #[error("invalid quantum {0}: must be a positive number of cycles")]
    InvalidQuantum(u32),
    /// The configuration names no known policy.
    #[error("unknown scheduling policy '{0}'")]
    UnknownPolicy(String),
}

/// Errors raised by the reference simulator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The workload failed validation.
    #[error("invalid workload ({} error(s))", .0.len())]
    Invalid(Vec<ValidationError>),
    /// The policy dispatched a pid that is not waiting for CPU.
    #[error("policy dispatched {0}, which is not waiting for CPU")]
    UnexpectedDispatch(Pid),
    /// The run did not finish within the configured number of cycles.
    #[error("simulation exceeded {limit} cycles with {unfinished} process(es) unfinished")]
    CycleLimit {
        /// Configured cycle limit.
        limit: u64,
        /// Processes still not complete when the limit was hit.
        unfinished: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_error_display() {
        assert_eq!(
            PolicyError::InvalidQuantum(0).to_string(),
            "invalid quantum 0: must be a positive number of cycles"
        );
        assert_eq!(
            PolicyError::UnknownPolicy("lottery".into()).to_string(),
            "unknown scheduling policy 'lottery'"
        );
    }

    #[test]
    fn test_simulation_error_display() {
        let err = SimulationError::CycleLimit {
            limit: 10,
            unfinished: 2,
        };
        assert_eq!(
            err.to_string(),
            "simulation exceeded 10 cycles with 2 process(es) unfinished"
        );
        assert_eq!(
            SimulationError::UnexpectedDispatch(Pid::new(4)).to_string(),
            "policy dispatched P4, which is not waiting for CPU"
        );
    }
}
