use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

use crate::error::InvariantViolation;

pub type JobId = u64;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    New,
    Ready,
    Running,
    Blocked,
    Exit,
}

impl JobState {
    pub fn can_become(self, to: JobState) -> bool {
        use JobState::*;
        matches!(
            (self, to),
            (New, Ready)
                | (Ready, Running)
                | (Running, Ready)
                | (Running, Blocked)
                | (Running, Exit)
                | (Blocked, Ready)
        )
    }
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub state: JobState,
    pub arrival_time: Ticks,
    pub cpu_bursts: VecDeque<Ticks>,
    pub io_bursts: VecDeque<Ticks>,
    // Sum of the CPU bursts as admitted; cpu_bursts shrinks as work completes
    pub cpu_demand: Ticks,
    pub start_time: Option<Ticks>,
    pub last_ready_time: Ticks,
    pub wait_time: Ticks,
    pub completion_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
}

impl Job {
    pub fn new(
        id: JobId,
        arrival_time: Ticks,
        cpu_bursts: impl IntoIterator<Item = Ticks>,
        io_bursts: impl IntoIterator<Item = Ticks>,
    ) -> Result<Self, InvariantViolation> {
        let cpu_bursts: VecDeque<Ticks> = cpu_bursts.into_iter().collect();
        let cpu_demand = cpu_bursts
            .iter()
            .try_fold(0, |total: Ticks, &burst| total.checked_add(burst))
            .ok_or(InvariantViolation::ClockOverflow(id))?;
        Ok(Self {
            id,
            state: JobState::New,
            arrival_time,
            cpu_bursts,
            io_bursts: io_bursts.into_iter().collect(),
            cpu_demand,
            start_time: None,
            last_ready_time: arrival_time,
            wait_time: 0,
            completion_time: None,
            turnaround_time: None,
        })
    }

    pub fn out_of_work(&self) -> bool {
        self.cpu_bursts.is_empty() && self.io_bursts.is_empty()
    }
}

/// FIFO of jobs waiting for the CPU. Round-robin order falls out of
/// admitting at the tail and always dispatching the head.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    jobs: VecDeque<JobId>,
    members: FxHashSet<JobId>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, job: JobId) -> Result<(), InvariantViolation> {
        if !self.members.insert(job) {
            return Err(InvariantViolation::AlreadyQueued(job));
        }
        self.jobs.push_back(job);
        Ok(())
    }

    pub fn dequeue(&mut self) -> Option<JobId> {
        let job = self.jobs.pop_front()?;
        let removed = self.members.remove(&job);
        debug_assert!(removed, "Job {job} missing ready-queue membership");
        Some(job)
    }

    pub fn contains(&self, job: JobId) -> bool {
        self.members.contains(&job)
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = JobId> + '_ {
        self.jobs.iter().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnCpu {
    pub job: JobId,
    pub since: Ticks,
}

#[derive(Debug, Default)]
pub struct SimCtx {
    pub now: Ticks,
    pub jobs: FxHashMap<JobId, Job>,
    pub ready: ReadyQueue,
    pub cpu: Option<OnCpu>,
}

impl SimCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_job(&mut self, job: Job) -> Result<(), InvariantViolation> {
        let id = job.id;
        if self.jobs.contains_key(&id) {
            return Err(InvariantViolation::DuplicateJob(id));
        }
        self.jobs.insert(id, job);
        Ok(())
    }

    pub fn job(&self, id: JobId) -> Result<&Job, InvariantViolation> {
        self.jobs.get(&id).ok_or(InvariantViolation::UnknownJob(id))
    }

    pub fn job_mut(&mut self, id: JobId) -> Result<&mut Job, InvariantViolation> {
        self.jobs
            .get_mut(&id)
            .ok_or(InvariantViolation::UnknownJob(id))
    }

    pub fn advance_time(&mut self, to: Ticks) {
        debug_assert!(to >= self.now, "Clock moved backwards: {} -> {to}", self.now);
        self.now = to;
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.cpu.is_none()
    }

    // Returns the previous state
    pub fn set_state(&mut self, id: JobId, to: JobState) -> Result<JobState, InvariantViolation> {
        let job = self.job_mut(id)?;
        let from = job.state;
        if !from.can_become(to) {
            return Err(InvariantViolation::IllegalTransition { job: id, from, to });
        }
        job.state = to;
        Ok(from)
    }

    pub fn mark_ready(&mut self, id: JobId) -> Result<JobState, InvariantViolation> {
        let now = self.now;
        let from = self.set_state(id, JobState::Ready)?;
        self.job_mut(id)?.last_ready_time = now;
        Ok(from)
    }

    pub fn set_running(&mut self, id: JobId) -> Result<JobState, InvariantViolation> {
        if let Some(on_cpu) = self.cpu {
            return Err(InvariantViolation::CpuBusy {
                job: id,
                running: on_cpu.job,
            });
        }
        debug_assert!(!self.ready.contains(id), "Running job {id} must not be queued");

        let from = self.set_state(id, JobState::Running)?;
        self.cpu = Some(OnCpu {
            job: id,
            since: self.now,
        });
        Ok(from)
    }

    /// Takes `id` off the CPU and returns how long it ran.
    pub fn clear_cpu(&mut self, id: JobId) -> Option<Ticks> {
        match self.cpu {
            Some(on_cpu) if on_cpu.job == id => {
                self.cpu = None;
                Some(self.now - on_cpu.since)
            }
            _ => None,
        }
    }
}
