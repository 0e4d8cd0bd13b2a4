//! Priority policy (non-preemptive).

use log::{debug, trace, warn};
use std::cmp::Reverse;

use super::{admissible, warn_duplicate, KeyedQueue, PolicyContext, PolicyState, SchedulingPolicy};
use crate::models::Pid;

/// Non-preemptive priority scheduling.
///
/// Higher priority values run first; equal priorities run in arrival order.
/// A process with no known priority gets priority 0.
#[derive(Debug, Clone)]
pub struct PriorityPolicy {
    state: PolicyState,
    ready_queue: KeyedQueue<Reverse<i32>>,
}

impl PriorityPolicy {
    /// Creates an idle policy with an empty queue.
    pub fn new() -> Self {
        Self {
            state: PolicyState::new(None),
            ready_queue: KeyedQueue::new(),
        }
    }
}

impl Default for PriorityPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingPolicy for PriorityPolicy {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn new_process(&mut self, pid: Pid, context: &PolicyContext) {
        if !admissible(self.name(), pid) {
            return;
        }
        let priority = context.priority(pid).unwrap_or_else(|| {
            warn!("PRIORITY: no priority for {pid}; queued with priority 0");
            0
        });
        if !self.ready_queue.push(pid, Reverse(priority)) {
            warn_duplicate(self.name(), pid);
            return;
        }
        trace!("PRIORITY: {pid} enqueued with priority {priority}");
    }

    fn dispatch(&mut self) -> Pid {
        let Some(pid) = self.ready_queue.pop() else {
            return Pid::IDLE;
        };
        self.state.start(pid);
        debug!("PRIORITY: dispatched {pid}");
        pid
    }

    fn preempt(&mut self) -> bool {
        false
    }

    fn reset_policy(&mut self) {
        self.ready_queue = KeyedQueue::new();
        self.state.reset();
        debug!("PRIORITY: reset");
    }

    fn state(&self) -> &PolicyState {
        &self.state
    }

    fn ready_count(&self) -> usize {
        self.ready_queue.len()
    }
}
