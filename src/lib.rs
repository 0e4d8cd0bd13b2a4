//! CPU-scheduling policies for discrete-event process simulators.
//!
//! A policy decides, at each decision point of a clock-stepped simulation,
//! which ready process runs next and whether the running process must give
//! up the CPU. Every policy implements the same four-operation contract, so a
//! simulator can hold "a policy" without knowing which variant it is.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Pid`, `Quantum`, `ProcessSpec`
//! - **`policy`**: The `SchedulingPolicy` contract and its variants
//!   (`RrSchedulingPolicy`, `FcfsPolicy`, `SjfPolicy`, `PriorityPolicy`)
//! - **`simulation`**: A reference clock-stepped driver and its report
//! - **`validation`**: Workload integrity checks (duplicate or reserved pids)
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::{Pid, Quantum};
//! use u_cpusched::policy::{PolicyContext, RrSchedulingPolicy, SchedulingPolicy};
//!
//! let mut rr = RrSchedulingPolicy::new(Quantum::new(3).unwrap());
//! let ctx = PolicyContext::at_time(0);
//! rr.new_process(Pid::new(1), &ctx);
//! rr.new_process(Pid::new(2), &ctx);
//!
//! assert_eq!(rr.dispatch(), Pid::new(1));
//! assert!(!rr.preempt());
//! assert!(!rr.preempt());
//! assert!(rr.preempt());
//! assert_eq!(rr.dispatch(), Pid::new(2));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod error;
pub mod models;
pub mod policy;
pub mod simulation;
pub mod validation;

pub use error::{PolicyError, SimulationError};
