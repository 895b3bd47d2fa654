use super::{EnqueueFlags, InvariantViolation, JobId, Scheduler, SimCtx, Ticks};

/// First-come first-served: bursts always run to completion.
pub struct FifoScheduler;

impl Scheduler for FifoScheduler {
    fn enqueue(
        &mut self,
        ctx: &mut SimCtx,
        job: JobId,
        flags: EnqueueFlags,
    ) -> Result<(), InvariantViolation> {
        let _ = flags;
        ctx.ready.enqueue(job)
    }

    fn slice(&self) -> Option<Ticks> {
        None
    }

    fn name(&self) -> String {
        "FCFS".to_string()
    }
}
