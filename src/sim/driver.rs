use super::job::{JobIdGen, JobSpec};
use crate::{
    core::{CompletedJob, JobId, SchedCore, SchedCoreEvent, Summary, Ticks},
    error::SimError,
    scheduler::{Quantum, RoundRobinScheduler, Scheduler},
};

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    ids: JobIdGen,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SimReport {
    /// In termination order.
    pub completed: Vec<CompletedJob>,
    pub summary: Option<Summary>,
    pub timeline: Vec<SchedCoreEvent>,
    pub end_time: Ticks,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(scheduler: S) -> Self {
        Self::with_ids(scheduler, JobIdGen::default())
    }

    pub fn with_ids(scheduler: S, ids: JobIdGen) -> Self {
        Self {
            core: SchedCore::new(scheduler),
            ids,
        }
    }

    pub fn add_job(&mut self, spec: JobSpec) -> Result<JobId, SimError> {
        let id = self.ids.next_id();
        self.core.admit(spec.into_job(id)?)?;
        Ok(id)
    }

    pub fn add_jobs(
        &mut self,
        specs: impl IntoIterator<Item = JobSpec>,
    ) -> Result<Vec<JobId>, SimError> {
        specs.into_iter().map(|spec| self.add_job(spec)).collect()
    }

    pub fn run(mut self) -> Result<SimReport, SimError> {
        self.core.run()?;

        let end_time = self.core.now();
        let (stats, observer) = self.core.into_parts();
        let summary = stats.summary(end_time);
        Ok(SimReport {
            completed: stats.into_completed(),
            summary,
            timeline: observer.into_timeline(),
            end_time,
        })
    }
}

impl Sim<RoundRobinScheduler> {
    pub fn round_robin(quantum: Quantum) -> Self {
        Self::new(RoundRobinScheduler::new(quantum))
    }
}

/// Loads `specs` in order and runs them under round robin.
pub fn run_round_robin(
    specs: impl IntoIterator<Item = JobSpec>,
    quantum: Quantum,
) -> Result<SimReport, SimError> {
    let mut sim = Sim::round_robin(quantum);
    sim.add_jobs(specs)?;
    sim.run()
}

impl SimReport {
    pub fn job(&self, id: JobId) -> Option<&CompletedJob> {
        self.completed.iter().find(|job| job.id == id)
    }

    pub fn dispatch_order(&self) -> Vec<JobId> {
        self.timeline
            .iter()
            .filter_map(|event| match event {
                SchedCoreEvent::Dispatched { job, .. } => Some(*job),
                _ => None,
            })
            .collect()
    }
}
