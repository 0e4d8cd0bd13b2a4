//! Scheduling policies.
//!
//! A policy is a reactive state machine driven by four calls from the
//! simulator. It never calls back into the simulator.
//!
//! | Call | When the simulator makes it |
//! |------|-----------------------------|
//! | `new_process` | A process arrives or becomes ready |
//! | `dispatch` | The CPU is idle |
//! | `preempt` | Once per later cycle while a process runs |
//! | `reset_policy` | Before each simulation run |
//!
//! # Usage
//!
//! ```
//! use u_cpusched::models::Pid;
//! use u_cpusched::policy::{PolicyConfig, PolicyContext, SchedulingPolicy};
//!
//! let mut policy = PolicyConfig::rr(2).unwrap().build();
//! policy.new_process(Pid::new(1), &PolicyContext::at_time(0));
//! assert_eq!(policy.dispatch(), Pid::new(1));
//! assert_eq!(policy.quantum_clock(), 1);
//! ```
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

mod config;
mod context;
mod fcfs;
mod priority;
mod queue;
mod rr;
mod sjf;

pub use config::PolicyConfig;
pub use context::PolicyContext;
pub use fcfs::FcfsPolicy;
pub use priority::PriorityPolicy;
pub use queue::{KeyedQueue, ReadyQueue};
pub use rr::RrSchedulingPolicy;
pub use sjf::SjfPolicy;

use crate::models::{Pid, Quantum};
use std::fmt::Debug;

/// The contract every scheduling policy implements.
///
/// Calls are strictly sequential. The simulator calls `dispatch` only when
/// it believes the CPU is idle, and `preempt` at most once per cycle for
/// the running process (never in the cycle the process was dispatched).
///
/// # Finished processes
/// A process that completes before its slice runs out is handled by the
/// simulator alone: it stops calling `preempt` and calls `dispatch` once the
/// CPU is free. The policy is never told about completions.
pub trait SchedulingPolicy: Send + Debug {
    /// Policy name (e.g., "RR", "FCFS").
    fn name(&self) -> &'static str;

    /// Registers a newly arrived or newly ready process.
    ///
    /// `IDLE`, or a pid that is already waiting, is ignored with a warning.
    fn new_process(&mut self, pid: Pid, context: &PolicyContext);

    /// Selects the next process to run, or `IDLE` if none is ready.
    ///
    /// The dispatch itself counts as the first cycle of the process's slice.
    /// An empty ready queue leaves the policy untouched.
    fn dispatch(&mut self) -> Pid;

    /// Whether the running process must yield now.
    ///
    /// On `true` the policy has already re-queued the process and the CPU is
    /// idle. With no process running this is a no-op returning `false`.
    fn preempt(&mut self) -> bool;

    /// Discards all queued processes and in-flight running/clock state.
    fn reset_policy(&mut self);

    /// Shared running/quantum bookkeeping.
    fn state(&self) -> &PolicyState;

    /// Number of processes waiting in the ready queue.
    fn ready_count(&self) -> usize;

    /// The process last dispatched and not yet preempted, or `IDLE`.
    fn running_pid(&self) -> Pid {
        self.state().running_pid()
    }

    /// Cycles left in the current slice.
    fn quantum_clock(&self) -> u32 {
        self.state().quantum_clock()
    }

    /// Whether any process is waiting.
    fn has_ready(&self) -> bool {
        self.ready_count() > 0
    }
}

/// Fields common to every policy: the running process and the slice clock.
///
/// Policies without a time slice carry `quantum = None` and a clock of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyState {
    running_pid: Pid,
    quantum: Option<Quantum>,
    quantum_clock: u32,
}

impl PolicyState {
    /// Initial idle state for a policy with the given slice.
    pub fn new(quantum: Option<Quantum>) -> Self {
        Self {
            running_pid: Pid::IDLE,
            quantum,
            quantum_clock: quantum.map_or(0, Quantum::cycles),
        }
    }

    /// The running process, or `IDLE`.
    pub fn running_pid(&self) -> Pid {
        self.running_pid
    }

    /// The configured slice, if the policy has one.
    pub fn quantum(&self) -> Option<Quantum> {
        self.quantum
    }

    /// Cycles left in the current slice (`0..=quantum`).
    pub fn quantum_clock(&self) -> u32 {
        self.quantum_clock
    }

    /// Marks `pid` running and arms the clock, consuming the dispatch cycle.
    pub(crate) fn start(&mut self, pid: Pid) {
        self.running_pid = pid;
        if let Some(q) = self.quantum {
            self.quantum_clock = q.cycles();
            self.quantum_clock -= 1;
        }
    }

    /// Consumes one cycle of the slice.
    pub(crate) fn tick(&mut self) {
        self.quantum_clock = self.quantum_clock.saturating_sub(1);
    }

    /// Clears the running process and returns it.
    pub(crate) fn vacate(&mut self) -> Pid {
        std::mem::replace(&mut self.running_pid, Pid::IDLE)
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.quantum);
    }
}

/// Rejects pids that can never be queued.
pub(crate) fn admissible(policy: &'static str, pid: Pid) -> bool {
    if pid.is_idle() {
        log::warn!("{policy}: ignoring registration of the IDLE sentinel");
        return false;
    }
    true
}

pub(crate) fn warn_duplicate(policy: &'static str, pid: Pid) {
    log::warn!("{policy}: {pid} is already waiting; duplicate registration ignored");
}
