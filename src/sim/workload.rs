//! Workload input: the line-oriented text format and seeded synthetic jobs.
//!
//! Each non-blank line describes one job:
//!
//! ```text
//! arrival_time num_cpu_bursts cpu0 io0 cpu1 io1 ... cpuN [ioN]
//! ```
//!
//! Lines starting with `#` are comments.

use rand::prelude::*;
use std::{fs, path::Path};
use tracing::debug;

use super::job::JobSpec;
use crate::{
    core::Ticks,
    error::{SimError, WorkloadError},
};

/// Parses one record. Blank and comment lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<JobSpec>, WorkloadError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields = line
        .split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            token.parse::<Ticks>().map_err(|_| WorkloadError::NotAnInteger {
                index,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if fields.len() < 3 {
        return Err(WorkloadError::TooFewFields(fields.len()));
    }
    let (arrival_time, declared, bursts) = (fields[0], fields[1], &fields[2..]);
    let declared = usize::try_from(declared).unwrap_or(usize::MAX);
    if declared == 0 {
        return Err(WorkloadError::NoCpuBursts);
    }
    // N CPU bursts carry N-1 or N I/O bursts between them
    if bursts.len().div_ceil(2) != declared {
        return Err(WorkloadError::BurstCount {
            declared,
            found: bursts.len(),
        });
    }

    let cpu_bursts = bursts.iter().step_by(2).copied().collect();
    let io_bursts = bursts.iter().skip(1).step_by(2).copied().collect();
    JobSpec::new(arrival_time, cpu_bursts, io_bursts).map(Some)
}

/// Parses a whole workload, reporting the first bad record by line number.
pub fn parse_workload(text: &str) -> Result<Vec<JobSpec>, SimError> {
    let mut specs = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let parsed = parse_line(line).map_err(|source| SimError::Workload {
            line: index + 1,
            source,
        })?;
        specs.extend(parsed);
    }
    Ok(specs)
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<JobSpec>, SimError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let specs = parse_workload(&text)?;
    debug!(path = %path.display(), jobs = specs.len(), "loaded workload");
    Ok(specs)
}

/// Knobs for [`bernoulli_jobs`].
#[derive(Debug, Clone)]
pub struct BernoulliParams {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_ticks: Ticks,
    pub long_ticks: Ticks,
    pub max_cpu_bursts: usize,
    pub max_io_ticks: Ticks,
    pub seed: u64,
}

impl Default for BernoulliParams {
    fn default() -> Self {
        Self {
            ticks: 100,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
            max_cpu_bursts: 3,
            max_io_ticks: 5,
            seed: 0,
        }
    }
}

/// Each tick, a job arrives with probability `p_arrival`. Its CPU bursts are
/// short with probability `p_short`, and consecutive bursts are separated by
/// I/O of `1..=max_io_ticks`.
pub fn bernoulli_jobs(params: &BernoulliParams) -> Vec<JobSpec> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut jobs = Vec::new();
    let max_cpu_bursts = params.max_cpu_bursts.max(1);
    let max_io_ticks = params.max_io_ticks.max(1);

    for t in 0..params.ticks {
        if rng.random::<f64>() >= params.p_arrival {
            continue;
        }

        let num_bursts = rng.random_range(1..=max_cpu_bursts);
        let cpu_bursts: Vec<Ticks> = (0..num_bursts)
            .map(|_| {
                if rng.random::<f64>() < params.p_short {
                    params.short_ticks
                } else {
                    params.long_ticks
                }
            })
            .collect();
        let io_bursts = (1..num_bursts)
            .map(|_| rng.random_range(1..=max_io_ticks))
            .collect();

        jobs.push(JobSpec {
            arrival_time: t,
            cpu_bursts,
            io_bursts,
        });
    }

    jobs
}
