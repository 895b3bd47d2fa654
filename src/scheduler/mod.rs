pub mod fifo;
pub mod rr;

use std::{fmt, num::NonZeroU64, str::FromStr};

use crate::{
    core::{JobId, SimCtx, Ticks},
    error::{InvariantViolation, SimError},
};
pub use fifo::FifoScheduler;
pub use rr::RoundRobinScheduler;

pub type EnqueueFlags = u64;

pub const ENQ_ARRIVAL: EnqueueFlags = 1 << 0;
pub const ENQ_WAKEUP: EnqueueFlags = 1 << 1;
pub const ENQ_PREEMPT: EnqueueFlags = 1 << 2;

pub const DEFAULT_QUANTUM: Quantum = Quantum(NonZeroU64::new(4).unwrap());

/// Round-robin time slice. Always at least one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    pub fn new(ticks: Ticks) -> Result<Self, SimError> {
        NonZeroU64::new(ticks)
            .map(Self)
            .ok_or_else(|| SimError::InvalidQuantum(ticks.to_string()))
    }

    pub fn ticks(self) -> Ticks {
        self.0.get()
    }
}

impl TryFrom<u64> for Quantum {
    type Error = SimError;

    fn try_from(ticks: u64) -> Result<Self, Self::Error> {
        Self::new(ticks)
    }
}

impl FromStr for Quantum {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SimError::InvalidQuantum(s.to_string());
        // Parse signed so "-3" is reported as non-positive rather than garbage
        let ticks: i128 = s.trim().parse().map_err(|_| invalid())?;
        u64::try_from(ticks)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait Scheduler {
    fn enqueue(
        &mut self,
        ctx: &mut SimCtx,
        job: JobId,
        flags: EnqueueFlags,
    ) -> Result<(), InvariantViolation>;

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<JobId> {
        ctx.ready.dequeue()
    }

    /// Longest stretch a job may hold the CPU; `None` runs each burst to the end.
    fn slice(&self) -> Option<Ticks>;

    fn name(&self) -> String;
}
