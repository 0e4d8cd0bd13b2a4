//! First-Come First-Served policy.

use log::{debug, trace};

use super::{admissible, warn_duplicate, PolicyContext, PolicyState, ReadyQueue, SchedulingPolicy};
use crate::models::Pid;

/// Non-preemptive FIFO scheduling. A dispatched process runs to completion.
#[derive(Debug, Clone)]
pub struct FcfsPolicy {
    state: PolicyState,
    ready_queue: ReadyQueue,
}

impl FcfsPolicy {
    /// Creates an idle policy with an empty queue.
    pub fn new() -> Self {
        Self {
            state: PolicyState::new(None),
            ready_queue: ReadyQueue::new(),
        }
    }

    /// Waiting processes, head first.
    pub fn ready_queue(&self) -> impl Iterator<Item = Pid> + '_ {
        self.ready_queue.iter()
    }
}

impl Default for FcfsPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingPolicy for FcfsPolicy {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn new_process(&mut self, pid: Pid, _context: &PolicyContext) {
        if !admissible(self.name(), pid) {
            return;
        }
        if !self.ready_queue.push_back(pid) {
            warn_duplicate(self.name(), pid);
            return;
        }
        trace!("FCFS: {pid} enqueued ({} ready)", self.ready_queue.len());
    }

    fn dispatch(&mut self) -> Pid {
        let Some(pid) = self.ready_queue.pop_front() else {
            return Pid::IDLE;
        };
        self.state.start(pid);
        debug!("FCFS: dispatched {pid}");
        pid
    }

    fn preempt(&mut self) -> bool {
        false
    }

    fn reset_policy(&mut self) {
        self.ready_queue = ReadyQueue::new();
        self.state.reset();
        debug!("FCFS: reset");
    }

    fn state(&self) -> &PolicyState {
        &self.state
    }

    fn ready_count(&self) -> usize {
        self.ready_queue.len()
    }
}
