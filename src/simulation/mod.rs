//! Reference clock-stepped simulator and run metrics.
//!
//! `Simulator` drives one policy instance through a workload, calling the
//! four policy operations in a fixed per-cycle order. `SimulationReport`
//! summarizes the run: CPU timeline, per-process times, and averages.
//!
//! # Per-cycle order
//!
//! 1. Register every process arriving this cycle (`new_process`).
//! 2. If a process kept running from the previous cycle, ask `preempt`.
//! 3. If the CPU is idle, `dispatch`.
//! 4. Run one cycle of the current process; retire it if it is done.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2 (criteria)

mod engine;
mod report;

pub use engine::{SimulationConfig, Simulator, DEFAULT_MAX_CYCLES};
pub use report::{ProcessStats, SimulationReport};
