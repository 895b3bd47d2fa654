use super::{
    event::SchedCoreEvent,
    state::{JobState, SimCtx},
};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    timeline: Vec<SchedCoreEvent>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: SchedCoreEvent) {
        self.timeline.push(event);
    }

    pub fn timeline(&self) -> &[SchedCoreEvent] {
        &self.timeline
    }

    pub fn into_timeline(self) -> Vec<SchedCoreEvent> {
        self.timeline
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        if let Some(on_cpu) = ctx.cpu {
            let job = ctx.jobs.get(&on_cpu.job);
            debug_assert!(
                job.is_some_and(|j| j.state == JobState::Running),
                "cpu.current job {} must be Running",
                on_cpu.job
            );
            debug_assert!(on_cpu.since <= ctx.now, "Dispatch time ahead of clock");
        }

        let running = ctx
            .jobs
            .values()
            .filter(|job| job.state == JobState::Running)
            .count();
        debug_assert!(running <= 1, "{running} jobs Running on a single CPU");

        for job_id in ctx.ready.iter() {
            match ctx.jobs.get(&job_id) {
                Some(job) => debug_assert_eq!(
                    job.state,
                    JobState::Ready,
                    "Job {job_id} queued while {:?}",
                    job.state
                ),
                None => debug_assert!(false, "Ready queue references unknown job {job_id}"),
            }
        }

        for job in ctx.jobs.values() {
            debug_assert_eq!(
                job.state == JobState::Exit,
                job.out_of_work() && job.completion_time.is_some(),
                "Job {} Exit state disagrees with its remaining work",
                job.id
            );
        }
    }
}
