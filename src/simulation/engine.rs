//! Simulation driver.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::report::{ProcessStats, SimulationReport};
use crate::error::SimulationError;
use crate::models::{Pid, ProcessSpec};
use crate::policy::{PolicyConfig, PolicyContext, SchedulingPolicy};
use crate::validation::validate_workload;

/// Cycle limit applied when none is configured.
pub const DEFAULT_MAX_CYCLES: u64 = 1_000_000;

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

/// Configuration for a simulation run.
///
/// ```
/// use u_cpusched::policy::PolicyConfig;
/// use u_cpusched::simulation::SimulationConfig;
///
/// let config: SimulationConfig =
///     serde_json::from_str(r#"{"policy":"rr","quantum":2,"max_cycles":500}"#).unwrap();
/// assert_eq!(config.policy, PolicyConfig::rr(2).unwrap());
/// assert_eq!(config.max_cycles, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Policy used for the run.
    #[serde(flatten)]
    pub policy: PolicyConfig,
    /// Abort the run after this many cycles.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl SimulationConfig {
    /// Creates a config with the default cycle limit.
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            policy,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }

    /// Sets the cycle limit.
    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = max_cycles;
        self
    }
}

#[derive(Debug, Clone, Default)]
struct Progress {
    remaining: u64,
    start_time: Option<u64>,
    finish_time: Option<u64>,
    dispatches: u32,
}

/// Single-threaded, clock-stepped driver for one policy instance.
///
/// # Example
/// ```
/// use u_cpusched::models::{Pid, ProcessSpec};
/// use u_cpusched::policy::PolicyConfig;
/// use u_cpusched::simulation::{SimulationConfig, Simulator};
///
/// let mut sim = Simulator::from_config(&SimulationConfig::new(PolicyConfig::rr(2).unwrap()));
/// let report = sim.run(&[ProcessSpec::new(1, 3), ProcessSpec::new(2, 2)]).unwrap();
/// let order: Vec<i32> = report.timeline.iter().map(|p| p.get()).collect();
/// assert_eq!(order, vec![1, 1, 2, 2, 1]);
/// ```
#[derive(Debug)]
pub struct Simulator {
    policy: Box<dyn SchedulingPolicy>,
    max_cycles: u64,
}

impl Simulator {
    /// Wraps an existing policy instance.
    pub fn new(policy: Box<dyn SchedulingPolicy>) -> Self {
        Self {
            policy,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }

    /// Builds a fresh policy from `config`.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.policy.build()).with_max_cycles(config.max_cycles)
    }

    /// Sets the cycle limit.
    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// The policy being driven.
    pub fn policy(&self) -> &dyn SchedulingPolicy {
        self.policy.as_ref()
    }

    /// Runs `workload` to completion.
    ///
    /// The policy is reset first, so a simulator can be reused across runs.
    ///
    /// # Errors
    /// - `SimulationError::Invalid` if the workload fails validation.
    /// - `SimulationError::CycleLimit` if the run does not finish in time.
    /// - `SimulationError::UnexpectedDispatch` if the policy hands out a pid
    ///   that is not waiting for CPU.
    pub fn run(&mut self, workload: &[ProcessSpec]) -> Result<SimulationReport, SimulationError> {
        validate_workload(workload).map_err(SimulationError::Invalid)?;
        self.policy.reset_policy();
        info!(
            "simulating {} process(es) under {}",
            workload.len(),
            self.policy.name()
        );

        let mut arrivals: Vec<&ProcessSpec> = workload.iter().collect();
        arrivals.sort_by_key(|p| p.arrival_time);
        let mut next_arrival = 0;

        let mut progress: HashMap<Pid, Progress> = workload
            .iter()
            .map(|p| {
                let entry = Progress {
                    remaining: p.service_time,
                    ..Default::default()
                };
                (p.pid, entry)
            })
            .collect();

        let mut ctx = PolicyContext::from_workload(0, workload);
        let mut timeline = Vec::new();
        let mut running = Pid::IDLE;
        let mut preemptions = 0;
        let mut finished = 0;
        let mut time: u64 = 0;

        while finished < workload.len() {
            if time >= self.max_cycles {
                return Err(SimulationError::CycleLimit {
                    limit: self.max_cycles,
                    unfinished: workload.len() - finished,
                });
            }
            ctx.set_time(time);

            while let Some(p) = arrivals.get(next_arrival).filter(|p| p.arrival_time <= time) {
                self.policy.new_process(p.pid, &ctx);
                next_arrival += 1;
            }

            if !running.is_idle() && self.policy.preempt() {
                debug!("t={time}: {running} preempted");
                running = Pid::IDLE;
                preemptions += 1;
            }

            if running.is_idle() {
                running = self.policy.dispatch();
                if !running.is_idle() {
                    let entry = progress
                        .get_mut(&running)
                        .filter(|e| e.remaining > 0)
                        .ok_or(SimulationError::UnexpectedDispatch(running))?;
                    entry.start_time.get_or_insert(time);
                    entry.dispatches += 1;
                    debug!("t={time}: {running} dispatched");
                }
            }

            timeline.push(running);
            if let Some(entry) = progress.get_mut(&running) {
                entry.remaining -= 1;
                if entry.remaining == 0 {
                    entry.finish_time = Some(time + 1);
                    finished += 1;
                    debug!("t={time}: {running} finished");
                    running = Pid::IDLE;
                }
            }

            time += 1;
        }

        let processes = workload
            .iter()
            .filter_map(|p| {
                let entry = progress.get(&p.pid)?;
                Some(ProcessStats::new(p, entry.start_time?, entry.finish_time?, entry.dispatches))
            })
            .collect();

        let report = SimulationReport {
            policy: self.policy.name().to_string(),
            total_cycles: time,
            timeline,
            processes,
            preemptions,
        };
        info!(
            "{} finished in {} cycle(s), avg turnaround {:.2}",
            report.policy,
            report.total_cycles,
            report.avg_turnaround()
        );
        Ok(report)
    }
}
