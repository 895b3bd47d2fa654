pub mod driver;
pub mod job;
pub mod report;
pub mod workload;

pub use driver::{Sim, SimReport, run_round_robin};
pub use job::{JobIdGen, JobSpec};
pub use workload::{BernoulliParams, bernoulli_jobs};
