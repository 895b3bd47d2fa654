use super::{EnqueueFlags, InvariantViolation, JobId, Quantum, Scheduler, SimCtx, Ticks};

pub struct RoundRobinScheduler {
    quantum: Quantum,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Quantum) -> Self {
        Self { quantum }
    }
}

impl Scheduler for RoundRobinScheduler {
    // Arrivals, wakeups and preempted jobs all rejoin at the tail
    fn enqueue(
        &mut self,
        ctx: &mut SimCtx,
        job: JobId,
        _flags: EnqueueFlags,
    ) -> Result<(), InvariantViolation> {
        ctx.ready.enqueue(job)
    }

    fn slice(&self) -> Option<Ticks> {
        Some(self.quantum.ticks())
    }

    fn name(&self) -> String {
        format!("Round Robin (quantum {})", self.quantum)
    }
}
