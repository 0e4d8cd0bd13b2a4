//! Run metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | finish - arrival |
//! | Waiting | turnaround - service |
//! | Response | first dispatch - arrival |
//! | Utilization | busy cycles / total cycles |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use serde::Serialize;

use crate::models::{Pid, ProcessSpec};

/// Per-process outcome of a run. All times are in cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    /// Process identifier.
    pub pid: Pid,
    /// Cycle the process arrived.
    pub arrival_time: u64,
    /// CPU cycles the process needed.
    pub service_time: u64,
    /// Cycle of the first dispatch.
    pub start_time: u64,
    /// Cycle after the last cycle the process ran.
    pub finish_time: u64,
    /// finish - arrival.
    pub turnaround_time: u64,
    /// Cycles spent ready but not running.
    pub waiting_time: u64,
    /// start - arrival.
    pub response_time: u64,
    /// How many times the process was dispatched.
    pub dispatches: u32,
}

impl ProcessStats {
    pub(crate) fn new(spec: &ProcessSpec, start_time: u64, finish_time: u64, dispatches: u32) -> Self {
        let turnaround_time = finish_time.saturating_sub(spec.arrival_time);
        Self {
            pid: spec.pid,
            arrival_time: spec.arrival_time,
            service_time: spec.service_time,
            start_time,
            finish_time,
            turnaround_time,
            waiting_time: turnaround_time.saturating_sub(spec.service_time),
            response_time: start_time.saturating_sub(spec.arrival_time),
            dispatches,
        }
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Name of the policy that was driven.
    pub policy: String,
    /// Cycles simulated.
    pub total_cycles: u64,
    /// Process on the CPU in each cycle (`IDLE` for idle cycles).
    pub timeline: Vec<Pid>,
    /// Per-process stats, in workload order.
    pub processes: Vec<ProcessStats>,
    /// Slices that ended in forced preemption.
    pub preemptions: usize,
}

impl SimulationReport {
    /// Stats for one process.
    pub fn stats(&self, pid: Pid) -> Option<&ProcessStats> {
        self.processes.iter().find(|s| s.pid == pid)
    }

    /// Cycles with no process on the CPU.
    pub fn idle_cycles(&self) -> u64 {
        self.timeline.iter().filter(|p| p.is_idle()).count() as u64
    }

    /// Number of dispatches across all processes.
    pub fn dispatches(&self) -> u64 {
        self.processes.iter().map(|s| u64::from(s.dispatches)).sum()
    }

    /// Fraction of cycles the CPU was busy (0.0..1.0).
    pub fn utilization(&self) -> f64 {
        if self.total_cycles == 0 {
            return 0.0;
        }
        (self.total_cycles - self.idle_cycles()) as f64 / self.total_cycles as f64
    }

    /// Mean turnaround time.
    pub fn avg_turnaround(&self) -> f64 {
        self.mean(|s| s.turnaround_time)
    }

    /// Mean waiting time.
    pub fn avg_waiting(&self) -> f64 {
        self.mean(|s| s.waiting_time)
    }

    /// Mean response time.
    pub fn avg_response(&self) -> f64 {
        self.mean(|s| s.response_time)
    }

    fn mean(&self, f: impl Fn(&ProcessStats) -> u64) -> f64 {
        if self.processes.is_empty() {
            return 0.0;
        }
        let total: u64 = self.processes.iter().map(f).sum();
        total as f64 / self.processes.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SimulationReport {
        let a = ProcessSpec::new(1, 2);
        let b = ProcessSpec::new(2, 1).with_arrival(1);
        SimulationReport {
            policy: "RR".into(),
            total_cycles: 4,
            timeline: vec![Pid::new(1), Pid::new(2), Pid::new(1), Pid::IDLE],
            processes: vec![ProcessStats::new(&a, 0, 3, 2), ProcessStats::new(&b, 1, 2, 1)],
            preemptions: 1,
        }
    }

    #[test]
    fn test_stats_derivation() {
        let s = ProcessStats::new(&ProcessSpec::new(1, 3).with_arrival(2), 4, 9, 2);
        assert_eq!(s.turnaround_time, 7);
        assert_eq!(s.waiting_time, 4);
        assert_eq!(s.response_time, 2);
    }

    #[test]
    fn test_averages() {
        let r = report();
        // turnaround: 3, 1
        assert!((r.avg_turnaround() - 2.0).abs() < 1e-10);
        // waiting: 1, 0
        assert!((r.avg_waiting() - 0.5).abs() < 1e-10);
        // response: 0, 0
        assert!(r.avg_response().abs() < 1e-10);
        assert!((r.utilization() - 0.75).abs() < 1e-10);
        assert_eq!(r.idle_cycles(), 1);
        assert_eq!(r.dispatches(), 3);
    }

    #[test]
    fn test_serializes_timeline_as_raw_pids() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["timeline"], serde_json::json!([1, 2, 1, -1]));
        assert_eq!(json["processes"][0]["turnaround_time"], 3);
    }
}
