//! Policy selection at simulation-configuration time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{FcfsPolicy, PriorityPolicy, RrSchedulingPolicy, SchedulingPolicy, SjfPolicy};
use crate::error::PolicyError;
use crate::models::Quantum;

/// Which policy a simulation run uses.
///
/// Serialized with a `policy` tag, e.g. `{"policy":"rr","quantum":3}`.
/// Also parses from short strings: `"fcfs"`, `"sjf"`, `"priority"`, `"rr:3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PolicyConfig {
    /// First-come first-served.
    Fcfs,
    /// Round-Robin with a time slice of `quantum` cycles.
    Rr {
        /// Slice length, validated when the config is parsed.
        quantum: Quantum,
    },
    /// Non-preemptive shortest job first.
    Sjf,
    /// Non-preemptive priority.
    Priority,
}

impl PolicyConfig {
    /// Round-Robin with a slice of `cycles` cycles.
    ///
    /// # Errors
    /// `PolicyError::InvalidQuantum` if `cycles` is zero.
    pub fn rr(cycles: u32) -> Result<Self, PolicyError> {
        Ok(Self::Rr {
            quantum: Quantum::new(cycles)?,
        })
    }

    /// Builds a fresh, independently owned policy instance.
    pub fn build(&self) -> Box<dyn SchedulingPolicy> {
        match *self {
            Self::Fcfs => Box::new(FcfsPolicy::new()),
            Self::Rr { quantum } => Box::new(RrSchedulingPolicy::new(quantum)),
            Self::Sjf => Box::new(SjfPolicy::new()),
            Self::Priority => Box::new(PriorityPolicy::new()),
        }
    }
}

impl FromStr for PolicyConfig {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.split_once(':') {
            None => match lower.as_str() {
                "fcfs" => Ok(Self::Fcfs),
                "sjf" => Ok(Self::Sjf),
                "priority" => Ok(Self::Priority),
                _ => Err(PolicyError::UnknownPolicy(s.to_string())),
            },
            Some(("rr", q)) => {
                let cycles: u32 = q
                    .parse()
                    .map_err(|_| PolicyError::UnknownPolicy(s.to_string()))?;
                Self::rr(cycles)
            }
            Some(_) => Err(PolicyError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => f.write_str("fcfs"),
            Self::Rr { quantum } => write!(f, "rr:{}", quantum.cycles()),
            Self::Sjf => f.write_str("sjf"),
            Self::Priority => f.write_str("priority"),
        }
    }
}
