//! Process identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier naming a simulated process.
///
/// Identifiers are compared by equality only. `Pid::IDLE` is reserved to
/// mean "no process" and is never handed out for a real process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(i32);

impl Pid {
    /// Sentinel meaning no process occupies the CPU.
    pub const IDLE: Pid = Pid(-1);

    /// Wraps a raw identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Whether this is the `IDLE` sentinel.
    pub const fn is_idle(self) -> bool {
        self.0 == Self::IDLE.0
    }
}

impl Default for Pid {
    fn default() -> Self {
        Self::IDLE
    }
}

impl From<i32> for Pid {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_idle() {
            f.write_str("IDLE")
        } else {
            write!(f, "P{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_sentinel() {
        assert!(Pid::IDLE.is_idle());
        assert!(!Pid::new(0).is_idle());
        assert_eq!(Pid::default(), Pid::IDLE);
    }

    #[test]
    fn test_display() {
        assert_eq!(Pid::new(7).to_string(), "P7");
        assert_eq!(Pid::IDLE.to_string(), "IDLE");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Pid::new(42)).unwrap();
        assert_eq!(json, "42");
        let pid: Pid = serde_json::from_str("-1").unwrap();
        assert!(pid.is_idle());
    }
}
