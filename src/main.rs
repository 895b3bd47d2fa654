use anyhow::{Context, Result};
use rr_model::{
    Quantum,
    scheduler::DEFAULT_QUANTUM,
    sim::{BernoulliParams, bernoulli_jobs, run_round_robin, workload},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: rr_model <quantum> [workload-file]";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let quantum = match args.next() {
        Some(arg) => arg.parse::<Quantum>().context(USAGE)?,
        None => {
            info!(quantum = %DEFAULT_QUANTUM, "no quantum given, using default");
            DEFAULT_QUANTUM
        }
    };

    let specs = match args.next() {
        Some(path) => workload::load(&path)?,
        None => {
            let params = BernoulliParams::default();
            info!(?params, "no workload file given, generating one");
            bernoulli_jobs(&params)
        }
    };

    let report = run_round_robin(specs, quantum)?;
    print!("{report}");

    if let Some(longest) = report.completed.iter().map(|job| job.wait_time).max() {
        info!(longest_wait = longest, end = report.end_time, "done");
    }
    Ok(())
}
