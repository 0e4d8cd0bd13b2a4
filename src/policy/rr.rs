//! Round-Robin policy.
//!
//! # Algorithm
//!
//! Ready processes wait in a FIFO queue. `dispatch` takes the head and gives
//! it a full slice of `quantum` cycles, the dispatch cycle included. Each
//! later cycle `preempt` burns one cycle; when the slice is spent the
//! process goes to the tail of the queue and the CPU becomes idle.
//!
//! Nothing but arrival order decides who runs next, so a preempted process
//! waits behind everyone who arrived or was re-queued before it.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3

use log::{debug, trace};

use super::{admissible, warn_duplicate, PolicyContext, PolicyState, ReadyQueue, SchedulingPolicy};
use crate::error::PolicyError;
use crate::models::{Pid, Quantum};

/// Round-Robin scheduling with a fixed time slice.
///
/// # Example
/// ```
/// use u_cpusched::models::Pid;
/// use u_cpusched::policy::{PolicyContext, RrSchedulingPolicy, SchedulingPolicy};
///
/// let mut rr = RrSchedulingPolicy::with_cycles(2).unwrap();
/// rr.new_process(Pid::new(1), &PolicyContext::default());
/// assert_eq!(rr.dispatch(), Pid::new(1));
/// assert!(!rr.preempt());
/// assert!(rr.preempt());
/// assert_eq!(rr.ready_queue().collect::<Vec<_>>(), vec![Pid::new(1)]);
/// ```
#[derive(Debug, Clone)]
pub struct RrSchedulingPolicy {
    state: PolicyState,
    ready_queue: ReadyQueue,
}

impl RrSchedulingPolicy {
    /// Creates an idle policy with an empty queue.
    pub fn new(quantum: Quantum) -> Self {
        let mut policy = Self {
            state: PolicyState::new(Some(quantum)),
            ready_queue: ReadyQueue::new(),
        };
        policy.reset_policy();
        policy
    }

    /// Creates a policy from a raw cycle count.
    ///
    /// # Errors
    /// `PolicyError::InvalidQuantum` if `cycles` is zero.
    pub fn with_cycles(cycles: u32) -> Result<Self, PolicyError> {
        Ok(Self::new(Quantum::new(cycles)?))
    }

    /// Waiting processes, head first.
    pub fn ready_queue(&self) -> impl Iterator<Item = Pid> + '_ {
        self.ready_queue.iter()
    }
}

impl SchedulingPolicy for RrSchedulingPolicy {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn new_process(&mut self, pid: Pid, _context: &PolicyContext) {
        if !admissible(self.name(), pid) {
            return;
        }
        if !self.ready_queue.push_back(pid) {
            warn_duplicate(self.name(), pid);
            return;
        }
        trace!("RR: {pid} enqueued ({} ready)", self.ready_queue.len());
    }

    fn dispatch(&mut self) -> Pid {
        let Some(pid) = self.ready_queue.pop_front() else {
            return Pid::IDLE;
        };
        self.state.start(pid);
        debug!(
            "RR: dispatched {pid}, {} cycle(s) left in slice",
            self.state.quantum_clock()
        );
        pid
    }

    fn preempt(&mut self) -> bool {
        let running = self.state.running_pid();
        if running.is_idle() {
            trace!("RR: preempt with no running process");
            return false;
        }

        if self.state.quantum_clock() == 0 {
            let pid = self.state.vacate();
            if !self.ready_queue.push_back(pid) {
                warn_duplicate(self.name(), pid);
            }
            debug!(
                "RR: {pid} preempted, re-queued behind {} process(es)",
                self.ready_queue.len() - 1
            );
            true
        } else {
            self.state.tick();
            trace!("RR: {running} continues, clock={}", self.state.quantum_clock());
            false
        }
    }

    fn reset_policy(&mut self) {
        self.ready_queue = ReadyQueue::new();
        self.state.reset();
        debug!("RR: reset, clock={}", self.state.quantum_clock());
    }

    fn state(&self) -> &PolicyState {
        &self.state
    }

    fn ready_count(&self) -> usize {
        self.ready_queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn rr(quantum: u32) -> RrSchedulingPolicy {
        RrSchedulingPolicy::with_cycles(quantum).unwrap()
    }

    fn enqueue(policy: &mut RrSchedulingPolicy, raw: &[i32]) {
        let ctx = PolicyContext::at_time(0);
        for &r in raw {
            policy.new_process(Pid::new(r), &ctx);
        }
    }

    fn queued(policy: &RrSchedulingPolicy) -> Vec<i32> {
        policy.ready_queue().map(Pid::get).collect()
    }

    /// Runs every queued process to completion, in the same per-cycle order
    /// as the simulator. Returns each slice as (pid, cycles run).
    fn drain(policy: &mut RrSchedulingPolicy, service: &HashMap<Pid, u64>) -> Vec<(Pid, u64)> {
        let mut remaining = service.clone();
        let mut slices: Vec<(Pid, u64)> = Vec::new();
        let mut running = Pid::IDLE;

        while remaining.values().any(|&r| r > 0) {
            // a runner carried over from the previous cycle is asked first
            if !running.is_idle() && policy.preempt() {
                running = Pid::IDLE;
            }
            if running.is_idle() {
                running = policy.dispatch();
                assert!(!running.is_idle(), "queue emptied with work left");
                slices.push((running, 0));
            }
            if let Some(last) = slices.last_mut() {
                last.1 += 1;
            }
            let left = remaining.get_mut(&running).unwrap();
            *left -= 1;
            if *left == 0 {
                running = Pid::IDLE;
            }
        }
        slices
    }

    fn order(slices: &[(Pid, u64)]) -> Vec<i32> {
        slices.iter().map(|(pid, _)| pid.get()).collect()
    }

    #[test]
    fn test_quantum_three_scenario() {
        let mut policy = rr(3);
        enqueue(&mut policy, &[1, 2]);

        assert_eq!(policy.dispatch(), Pid::new(1));
        assert_eq!(policy.quantum_clock(), 2);
        assert!(!policy.preempt());
        assert_eq!(policy.quantum_clock(), 1);
        assert!(!policy.preempt());
        assert_eq!(policy.quantum_clock(), 0);
        assert!(policy.preempt());
        assert!(policy.running_pid().is_idle());
        assert_eq!(queued(&policy), vec![2, 1]);

        assert_eq!(policy.dispatch(), Pid::new(2));
        assert_eq!(queued(&policy), vec![1]);
    }

    #[test]
    fn test_dispatch_empty_is_idle_and_pure() {
        let mut policy = rr(4);
        let before = policy.state().clone();
        assert_eq!(policy.dispatch(), Pid::IDLE);
        assert_eq!(policy.dispatch(), Pid::IDLE);
        assert_eq!(policy.state(), &before);
        assert_eq!(policy.ready_count(), 0);
    }

    #[test]
    fn test_dispatch_empty_after_finish_keeps_stale_runner() {
        let mut policy = rr(4);
        enqueue(&mut policy, &[1]);
        assert_eq!(policy.dispatch(), Pid::new(1));
        assert!(!policy.preempt());
        // 1 finishes here; the simulator stops calling preempt

        let before = policy.state().clone();
        assert_eq!(policy.dispatch(), Pid::IDLE);
        assert_eq!(policy.dispatch(), Pid::IDLE);
        assert_eq!(policy.state(), &before);
        assert_eq!(policy.running_pid(), Pid::new(1));
        assert_eq!(policy.quantum_clock(), 2);
        assert_eq!(policy.ready_count(), 0);
    }

    #[test]
    fn test_quantum_one_preempts_next_cycle() {
        let mut policy = rr(1);
        enqueue(&mut policy, &[5]);
        assert_eq!(policy.dispatch(), Pid::new(5));
        assert_eq!(policy.quantum_clock(), 0);
        assert!(policy.preempt());
        assert_eq!(queued(&policy), vec![5]);
    }

    #[test]
    fn test_preempted_goes_behind_new_arrivals() {
        let mut policy = rr(2);
        enqueue(&mut policy, &[1]);
        assert_eq!(policy.dispatch(), Pid::new(1));
        enqueue(&mut policy, &[2, 3]);
        assert!(!policy.preempt());
        assert!(policy.preempt());
        assert_eq!(queued(&policy), vec![2, 3, 1]);
    }

    #[test]
    fn test_preempt_without_runner_is_noop() {
        let mut policy = rr(2);
        enqueue(&mut policy, &[1]);
        let before = policy.state().clone();
        assert!(!policy.preempt());
        assert_eq!(policy.state(), &before);
        assert_eq!(queued(&policy), vec![1]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut policy = rr(3);
        enqueue(&mut policy, &[1, 2, 3]);
        policy.dispatch();
        policy.preempt();

        policy.reset_policy();
        assert_eq!(policy.ready_count(), 0);
        assert!(policy.running_pid().is_idle());
        assert_eq!(policy.quantum_clock(), 3);
        assert_eq!(policy.dispatch(), Pid::IDLE);
    }

    #[test]
    fn test_idle_and_duplicates_ignored() {
        let mut policy = rr(2);
        let ctx = PolicyContext::default();
        policy.new_process(Pid::IDLE, &ctx);
        policy.new_process(Pid::new(1), &ctx);
        policy.new_process(Pid::new(1), &ctx);
        assert_eq!(queued(&policy), vec![1]);
    }

    #[test]
    fn test_zero_quantum_rejected() {
        assert_eq!(
            RrSchedulingPolicy::with_cycles(0).unwrap_err(),
            PolicyError::InvalidQuantum(0)
        );
    }

    #[test]
    fn test_drain_interleaves() {
        let mut policy = rr(2);
        enqueue(&mut policy, &[1, 2]);
        let service = HashMap::from([(Pid::new(1), 3), (Pid::new(2), 3)]);
        let slices = drain(&mut policy, &service);
        assert_eq!(order(&slices), vec![1, 2, 1, 2]);
        let cycles: Vec<u64> = slices.iter().map(|&(_, c)| c).collect();
        assert_eq!(cycles, vec![2, 2, 1, 1]);
    }

    proptest! {
        #[test]
        fn prop_preempt_fires_on_quantum_th_call(quantum in 1u32..50) {
            let mut policy = rr(quantum);
            enqueue(&mut policy, &[1]);
            policy.dispatch();
            for _ in 1..quantum {
                prop_assert!(!policy.preempt());
            }
            prop_assert!(policy.preempt());
        }

        #[test]
        fn prop_fifo_without_preemption(raw in proptest::collection::hash_set(0i32..1000, 0..40)) {
            let raw: Vec<i32> = raw.into_iter().collect();
            let mut policy = rr(3);
            enqueue(&mut policy, &raw);
            let order: Vec<i32> = std::iter::from_fn(|| {
                let pid = policy.dispatch();
                (!pid.is_idle()).then_some(pid.get())
            })
            .collect();
            prop_assert_eq!(order, raw);
        }

        #[test]
        fn prop_every_process_completes(
            quantum in 1u32..6,
            service in proptest::collection::vec(1u64..12, 1..20),
        ) {
            let mut policy = rr(quantum);
            let service: HashMap<Pid, u64> = service
                .into_iter()
                .enumerate()
                .map(|(i, s)| (Pid::new(i32::try_from(i).unwrap()), s))
                .collect();
            let mut pids: Vec<i32> = service.keys().map(|p| p.get()).collect();
            pids.sort_unstable();
            enqueue(&mut policy, &pids);

            let slices = drain(&mut policy, &service);

            // no work lost or duplicated
            let mut ran: HashMap<Pid, u64> = HashMap::new();
            for &(pid, cycles) in &slices {
                prop_assert!(cycles >= 1 && cycles <= u64::from(quantum));
                *ran.entry(pid).or_default() += cycles;
            }
            prop_assert_eq!(&ran, &service);

            // only a process's last slice may end before the quantum is spent
            for (i, &(pid, cycles)) in slices.iter().enumerate() {
                let later = slices[i + 1..].iter().any(|&(p, _)| p == pid);
                if later {
                    prop_assert_eq!(cycles, u64::from(quantum));
                }
            }

            // first round follows arrival order
            let first_round: Vec<i32> = order(&slices).into_iter().take(pids.len()).collect();
            prop_assert_eq!(first_round, pids);
            prop_assert_eq!(policy.ready_count(), 0);
        }

        #[test]
        fn prop_preempted_lands_at_tail(
            quantum in 1u32..5,
            waiting in proptest::collection::vec(1i32..100, 0..10),
        ) {
            let mut policy = rr(quantum);
            enqueue(&mut policy, &[0]);
            policy.dispatch();
            let mut expected: Vec<i32> = Vec::new();
            for w in waiting {
                if !expected.contains(&w) {
                    expected.push(w);
                }
            }
            enqueue(&mut policy, &expected);
            while !policy.preempt() {}
            expected.push(0);
            prop_assert_eq!(queued(&policy), expected);
        }
    }
}
