use std::path::PathBuf;

use thiserror::Error;

use crate::core::{EventKind, JobId, JobState};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("workload line {line}: {source}")]
    Workload {
        line: usize,
        #[source]
        source: WorkloadError,
    },

    #[error("time quantum must be a positive integer, got {0:?}")]
    InvalidQuantum(String),

    #[error("failed to read workload {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("internal consistency violation: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Rejection of a single workload record, before any job is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkloadError {
    #[error("expected at least 3 fields, found {0}")]
    TooFewFields(usize),

    #[error("field {index} is not a non-negative integer: {token:?}")]
    NotAnInteger { index: usize, token: String },

    #[error("a job needs at least one CPU burst")]
    NoCpuBursts,

    #[error("{declared} CPU bursts declared but {found} burst values given")]
    BurstCount { declared: usize, found: usize },

    #[error("{cpu} CPU bursts cannot interleave with {io} I/O bursts")]
    Interleave { cpu: usize, io: usize },

    #[error("arrival time plus total burst time does not fit in the clock")]
    TooLarge,
}

/// The engine reached a state its own transitions should never produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("job {0} is not in the job table")]
    UnknownJob(JobId),

    #[error("job {0} was admitted twice")]
    DuplicateJob(JobId),

    #[error("job {0} has no CPU burst left")]
    MissingCpuBurst(JobId),

    #[error("job {0} has no I/O burst left")]
    MissingIoBurst(JobId),

    #[error("job {job} cannot move from {from:?} to {to:?}")]
    IllegalTransition {
        job: JobId,
        from: JobState,
        to: JobState,
    },

    #[error("job {0} is already in the ready queue")]
    AlreadyQueued(JobId),

    #[error("dispatching job {job} while job {running} holds the CPU")]
    CpuBusy { job: JobId, running: JobId },

    #[error("{kind:?} for job {job} but the CPU is held by {holder:?}")]
    NotOnCpu {
        job: JobId,
        kind: EventKind,
        holder: Option<JobId>,
    },

    #[error("job {0} terminated without ever being dispatched")]
    NeverDispatched(JobId),

    #[error("job {0} needs time past the end of the clock")]
    ClockOverflow(JobId),

    #[error("job {0} terminated with bursts left")]
    WorkLeft(JobId),

    #[error("{0} job(s) left ready or running with no pending event")]
    Stalled(usize),
}
