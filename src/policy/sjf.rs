//! Shortest-Job-First policy (non-preemptive).
//!
//! Picks the ready process with the smallest total service time. Equal
//! service times are served in arrival order.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.2

use log::{debug, trace, warn};

use super::{admissible, warn_duplicate, KeyedQueue, PolicyContext, PolicyState, SchedulingPolicy};
use crate::models::Pid;

/// Non-preemptive shortest-job-first scheduling.
///
/// Service times come from the `PolicyContext` given at registration. A
/// process with no known service time is treated as the longest job.
#[derive(Debug, Clone)]
pub struct SjfPolicy {
    state: PolicyState,
    ready_queue: KeyedQueue<u64>,
}

impl SjfPolicy {
    /// Creates an idle policy with an empty queue.
    pub fn new() -> Self {
        Self {
            state: PolicyState::new(None),
            ready_queue: KeyedQueue::new(),
        }
    }
}

impl Default for SjfPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingPolicy for SjfPolicy {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn new_process(&mut self, pid: Pid, context: &PolicyContext) {
        if !admissible(self.name(), pid) {
            return;
        }
        let service = context.service_time(pid).unwrap_or_else(|| {
            warn!("SJF: no service time for {pid}; queued as longest job");
            u64::MAX
        });
        if !self.ready_queue.push(pid, service) {
            warn_duplicate(self.name(), pid);
            return;
        }
        trace!("SJF: {pid} enqueued with service {service}");
    }

    fn dispatch(&mut self) -> Pid {
        let Some(pid) = self.ready_queue.pop() else {
            return Pid::IDLE;
        };
        self.state.start(pid);
        debug!("SJF: dispatched {pid}");
        pid
    }

    fn preempt(&mut self) -> bool {
        false
    }

    fn reset_policy(&mut self) {
        self.ready_queue = KeyedQueue::new();
        self.state.reset();
        debug!("SJF: reset");
    }

    fn state(&self) -> &PolicyState {
        &self.state
    }

    fn ready_count(&self) -> usize {
        self.ready_queue.len()
    }
}
