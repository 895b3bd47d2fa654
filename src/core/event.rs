use crate::core::{EventKind, JobId, JobState, Ticks};

/// One entry of the simulation timeline, as seen by the observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCoreEvent {
    Fired {
        time: Ticks,
        job: JobId,
        kind: EventKind,
    },
    JobStateChange {
        time: Ticks,
        job: JobId,
        from: JobState,
        to: JobState,
    },
    // The CPU was handed to `job`; `next` is what its slice ends in
    Dispatched {
        time: Ticks,
        job: JobId,
        next: EventKind,
        until: Ticks,
    },
}

impl SchedCoreEvent {
    pub fn time(&self) -> Ticks {
        match self {
            Self::Fired { time, .. }
            | Self::JobStateChange { time, .. }
            | Self::Dispatched { time, .. } => *time,
        }
    }

    pub fn job(&self) -> JobId {
        match self {
            Self::Fired { job, .. }
            | Self::JobStateChange { job, .. }
            | Self::Dispatched { job, .. } => *job,
        }
    }
}
