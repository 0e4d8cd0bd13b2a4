//! Process scheduling domain models.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Pid` | Opaque process identifier, with the `IDLE` sentinel |
//! | `Quantum` | Round-Robin time slice, in cycles |
//! | `ProcessSpec` | Arrival, service time and priority of a simulated process |

mod pid;
mod process;
mod quantum;

pub use pid::Pid;
pub use process::{random_workload, ProcessSpec, WorkloadShape};
pub use quantum::Quantum;
