//! Workload model.
//!
//! A process specification is what the simulator knows about a process
//! before it runs: when it arrives, how many cycles of CPU it needs, and its
//! priority. Policies never see this type directly; the simulator hands them
//! the relevant facts through a `PolicyContext`.
//!
//! # Time Representation
//! All times are in simulated CPU cycles relative to the start of the run (t=0).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Pid;

/// A process to be simulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier.
    pub pid: Pid,
    /// Cycle at which the process becomes ready.
    pub arrival_time: u64,
    /// Total CPU cycles the process needs to finish.
    pub service_time: u64,
    /// Scheduling priority (higher = more important).
    #[serde(default)]
    pub priority: i32,
}

impl ProcessSpec {
    /// Creates a process arriving at t=0 with priority 0.
    pub fn new(pid: impl Into<Pid>, service_time: u64) -> Self {
        Self {
            pid: pid.into(),
            arrival_time: 0,
            service_time,
            priority: 0,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival_time: u64) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Parameters for generating a random workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadShape {
    /// Number of processes.
    pub count: usize,
    /// Latest possible arrival time (inclusive).
    pub max_arrival: u64,
    /// Service time range (inclusive).
    pub service_range: (u64, u64),
    /// Priority range (inclusive).
    pub priority_range: (i32, i32),
}

impl Default for WorkloadShape {
    fn default() -> Self {
        Self {
            count: 10,
            max_arrival: 20,
            service_range: (1, 10),
            priority_range: (0, 5),
        }
    }
}

/// Generates a random workload with pids `1..=count`, sorted by arrival.
///
/// Service times below one cycle are clamped to one. `count` is capped at
/// `i32::MAX` so every pid stays positive.
pub fn random_workload<R: Rng + ?Sized>(shape: &WorkloadShape, rng: &mut R) -> Vec<ProcessSpec> {
    let (s_lo, s_hi) = shape.service_range;
    let s_lo = s_lo.max(1);
    let s_hi = s_hi.max(s_lo);
    let (p_lo, p_hi) = shape.priority_range;
    let p_hi = p_hi.max(p_lo);

    let mut procs: Vec<ProcessSpec> = (1..=i32::MAX)
        .take(shape.count)
        .map(|pid| {
            ProcessSpec::new(pid, rng.random_range(s_lo..=s_hi))
                .with_arrival(rng.random_range(0..=shape.max_arrival))
                .with_priority(rng.random_range(p_lo..=p_hi))
        })
        .collect();
    // stable: equal arrivals keep pid order
    procs.sort_by_key(|p| p.arrival_time);
    procs
}
