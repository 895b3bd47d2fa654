//! Aggregation of completed-job metrics and CPU busy time.

use average::{Estimate, Mean};

use super::state::{Job, JobId, Ticks};

/// Immutable record of a job at the moment it terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedJob {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub start_time: Ticks,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub wait_time: Ticks,
    pub cpu_demand: Ticks,
}

impl CompletedJob {
    /// `None` unless the job has been dispatched and has terminated.
    pub fn from_job(job: &Job) -> Option<Self> {
        Some(Self {
            id: job.id,
            arrival_time: job.arrival_time,
            start_time: job.start_time?,
            completion_time: job.completion_time?,
            turnaround_time: job.turnaround_time?,
            wait_time: job.wait_time,
            cpu_demand: job.cpu_demand,
        })
    }

    // Time to first run
    pub fn response_time(&self) -> Ticks {
        self.start_time - self.arrival_time
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub completed: usize,
    pub total_turnaround: Ticks,
    pub total_wait: Ticks,
    pub avg_turnaround: f64,
    pub avg_wait: f64,
    pub avg_response: f64,
    pub busy_time: Ticks,
    pub elapsed: Ticks,
    /// Percentage in `[0, 100]`.
    pub cpu_utilization: f64,
}

#[derive(Debug, Default)]
pub struct StatsCollector {
    completed: Vec<CompletedJob>,
    total_turnaround: Ticks,
    total_wait: Ticks,
    turnaround: Mean,
    wait: Mean,
    response: Mean,
    busy_time: Ticks,
    first_dispatch: Option<Ticks>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note_dispatch(&mut self, now: Ticks) {
        self.first_dispatch.get_or_insert(now);
    }

    pub fn add_busy(&mut self, ran_for: Ticks) {
        self.busy_time = self.busy_time.saturating_add(ran_for);
    }

    pub fn record(&mut self, job: CompletedJob) {
        self.total_turnaround = self.total_turnaround.saturating_add(job.turnaround_time);
        self.total_wait = self.total_wait.saturating_add(job.wait_time);
        self.turnaround.add(job.turnaround_time as f64);
        self.wait.add(job.wait_time as f64);
        self.response.add(job.response_time() as f64);
        self.completed.push(job);
    }

    pub fn completed(&self) -> &[CompletedJob] {
        &self.completed
    }

    pub fn busy_time(&self) -> Ticks {
        self.busy_time
    }

    /// Summary figures for a run whose last event fired at `end`.
    /// `None` when no job completed.
    pub fn summary(&self, end: Ticks) -> Option<Summary> {
        if self.completed.is_empty() {
            return None;
        }

        let elapsed = end - self.first_dispatch.unwrap_or(end);
        let cpu_utilization = if elapsed == 0 {
            0.0
        } else {
            (self.busy_time as f64 / elapsed as f64 * 100.0).min(100.0)
        };

        Some(Summary {
            completed: self.completed.len(),
            total_turnaround: self.total_turnaround,
            total_wait: self.total_wait,
            avg_turnaround: self.turnaround.mean(),
            avg_wait: self.wait.mean(),
            avg_response: self.response.mean(),
            busy_time: self.busy_time,
            elapsed,
            cpu_utilization,
        })
    }

    pub fn into_completed(self) -> Vec<CompletedJob> {
        self.completed
    }
}
