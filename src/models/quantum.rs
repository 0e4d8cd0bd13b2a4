//! Time slice length.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PolicyError;

/// Number of CPU cycles a process may run before forced preemption.
///
/// Always positive. Fixed for the lifetime of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantum(u32);

impl Quantum {
    /// Creates a quantum of `cycles` cycles.
    ///
    /// # Errors
    /// `PolicyError::InvalidQuantum` if `cycles` is zero.
    pub fn new(cycles: u32) -> Result<Self, PolicyError> {
        if cycles == 0 {
            return Err(PolicyError::InvalidQuantum(cycles));
        }
        Ok(Self(cycles))
    }

    /// Length of the slice in cycles.
    pub const fn cycles(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantum {
    type Error = PolicyError;

    fn try_from(cycles: u32) -> Result<Self, Self::Error> {
        Self::new(cycles)
    }
}

impl From<Quantum> for u32 {
    fn from(q: Quantum) -> Self {
        q.0
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cycles", self.0)
    }
}
