//! Read-only simulator facts passed to policies.

use std::collections::HashMap;

use crate::models::{Pid, ProcessSpec};

/// Snapshot of simulator state handed to `SchedulingPolicy::new_process`.
///
/// The policy never holds a reference back into the simulator. Anything a
/// variant needs to order its queue (service time for SJF, priority for the
/// priority policy) is carried here instead.
#[derive(Debug, Clone, Default)]
pub struct PolicyContext {
    /// Current simulation time (cycles).
    pub current_time: u64,
    /// Total service time per process (cycles).
    pub service_times: HashMap<Pid, u64>,
    /// Scheduling priority per process (higher = more important).
    pub priorities: HashMap<Pid, i32>,
}

impl PolicyContext {
    /// Creates an empty context at the given time.
    pub fn at_time(current_time: u64) -> Self {
        Self {
            current_time,
            ..Default::default()
        }
    }

    /// Builds a context describing every process in `workload`.
    pub fn from_workload(current_time: u64, workload: &[ProcessSpec]) -> Self {
        workload.iter().fold(Self::at_time(current_time), |ctx, p| {
            ctx.with_service_time(p.pid, p.service_time)
                .with_priority(p.pid, p.priority)
        })
    }

    /// Sets the service time of a process.
    pub fn with_service_time(mut self, pid: Pid, cycles: u64) -> Self {
        self.service_times.insert(pid, cycles);
        self
    }

    /// Sets the priority of a process.
    pub fn with_priority(mut self, pid: Pid, priority: i32) -> Self {
        self.priorities.insert(pid, priority);
        self
    }

    /// Moves the clock without touching the process facts.
    pub fn set_time(&mut self, current_time: u64) {
        self.current_time = current_time;
    }

    /// Service time of a process, if known.
    pub fn service_time(&self, pid: Pid) -> Option<u64> {
        self.service_times.get(&pid).copied()
    }

    /// Priority of a process, if known.
    pub fn priority(&self, pid: Pid) -> Option<i32> {
        self.priorities.get(&pid).copied()
    }
}
