use crate::{
    core::{Job, JobId, Ticks},
    error::{InvariantViolation, WorkloadError},
};

/// A validated workload record: what a job needs, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub arrival_time: Ticks,
    pub cpu_bursts: Vec<Ticks>,
    pub io_bursts: Vec<Ticks>,
}

impl JobSpec {
    pub fn new(
        arrival_time: Ticks,
        cpu_bursts: Vec<Ticks>,
        io_bursts: Vec<Ticks>,
    ) -> Result<Self, WorkloadError> {
        if cpu_bursts.is_empty() {
            return Err(WorkloadError::NoCpuBursts);
        }
        // One I/O burst after every CPU burst, except possibly the last
        let (cpu, io) = (cpu_bursts.len(), io_bursts.len());
        if io != cpu && io + 1 != cpu {
            return Err(WorkloadError::Interleave { cpu, io });
        }
        // Bounds every timestamp this job alone can produce
        cpu_bursts
            .iter()
            .chain(&io_bursts)
            .try_fold(arrival_time, |end, &burst| end.checked_add(burst))
            .ok_or(WorkloadError::TooLarge)?;
        Ok(Self {
            arrival_time,
            cpu_bursts,
            io_bursts,
        })
    }

    pub fn cpu_demand(&self) -> Ticks {
        self.cpu_bursts.iter().sum()
    }

    pub fn into_job(self, id: JobId) -> Result<Job, InvariantViolation> {
        Job::new(id, self.arrival_time, self.cpu_bursts, self.io_bursts)
    }
}

/// Hands out job ids in admission order. Ids are never reused.
#[derive(Debug, Clone)]
pub struct JobIdGen {
    next: JobId,
}

impl JobIdGen {
    pub fn starting_at(first: JobId) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> JobId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for JobIdGen {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential() {
        let mut ids = JobIdGen::default();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);

        let mut zero_based = JobIdGen::starting_at(0);
        assert_eq!(zero_based.next_id(), 0);
    }

    #[test]
    fn burst_interleaving_is_checked() {
        assert!(JobSpec::new(0, vec![3], vec![]).is_ok());
        assert!(JobSpec::new(0, vec![3], vec![2]).is_ok());
        assert!(JobSpec::new(0, vec![3, 4], vec![2]).is_ok());
        assert_eq!(
            JobSpec::new(0, vec![], vec![]),
            Err(WorkloadError::NoCpuBursts)
        );
        assert_eq!(
            JobSpec::new(0, vec![3], vec![1, 1]),
            Err(WorkloadError::Interleave { cpu: 1, io: 2 })
        );
        assert_eq!(
            JobSpec::new(0, vec![3, 3, 3], vec![1]),
            Err(WorkloadError::Interleave { cpu: 3, io: 1 })
        );
    }

    #[test]
    fn total_time_must_fit_the_clock() {
        assert_eq!(
            JobSpec::new(u64::MAX, vec![5], vec![]),
            Err(WorkloadError::TooLarge)
        );
        assert_eq!(
            JobSpec::new(0, vec![u64::MAX, 1], vec![1]),
            Err(WorkloadError::TooLarge)
        );
        assert!(JobSpec::new(u64::MAX - 5, vec![5], vec![]).is_ok());
    }

    #[test]
    fn into_job_starts_new() {
        let job = JobSpec::new(7, vec![3, 4], vec![2]).unwrap().into_job(5).unwrap();
        assert_eq!(job.id, 5);
        assert_eq!(job.arrival_time, 7);
        assert_eq!(job.last_ready_time, 7);
        assert_eq!(job.cpu_demand, 7);
        assert_eq!(job.state, crate::core::JobState::New);
        assert_eq!(job.cpu_bursts, [3, 4]);
        assert_eq!(job.io_bursts, [2]);
    }
}
