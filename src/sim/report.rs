use std::fmt;

use super::driver::SimReport;
use crate::core::{CompletedJob, Summary};

pub struct TerminationLine<'a>(pub &'a CompletedJob);

impl fmt::Display for TerminationLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job {} terminated: Turn-Around-Time = {}, Wait time = {}",
            self.0.id, self.0.turnaround_time, self.0.wait_time
        )
    }
}

pub struct SummaryBlock<'a>(pub Option<&'a Summary>);

impl fmt::Display for SummaryBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(summary) = self.0 else {
            return writeln!(f, "No jobs were completed in the simulation.");
        };
        writeln!(f, "--- Simulation Summary ---")?;
        writeln!(f, "CPU Utilization: {:.2}%", summary.cpu_utilization)?;
        writeln!(f, "Average Turnaround Time: {:.2}", summary.avg_turnaround)?;
        writeln!(f, "Average Wait Time: {:.2}", summary.avg_wait)
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for job in &self.completed {
            writeln!(f, "{}", TerminationLine(job))?;
        }
        if !self.completed.is_empty() {
            writeln!(f)?;
        }
        write!(f, "{}", SummaryBlock(self.summary.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(completed: Vec<CompletedJob>, summary: Option<Summary>) -> SimReport {
        SimReport {
            completed,
            summary,
            timeline: Vec::new(),
            end_time: 0,
        }
    }

    #[test]
    fn empty_run() {
        assert_eq!(
            report(Vec::new(), None).to_string(),
            "No jobs were completed in the simulation.\n"
        );
    }

    #[test]
    fn termination_lines_then_summary() {
        let job = CompletedJob {
            id: 2,
            arrival_time: 0,
            start_time: 2,
            completion_time: 3,
            turnaround_time: 3,
            wait_time: 2,
            cpu_demand: 1,
        };
        let summary = Summary {
            completed: 1,
            total_turnaround: 3,
            total_wait: 2,
            avg_turnaround: 3.0,
            avg_wait: 2.0,
            avg_response: 2.0,
            busy_time: 2,
            elapsed: 3,
            cpu_utilization: 200.0 / 3.0,
        };

        assert_eq!(
            report(vec![job], Some(summary)).to_string(),
            "Job 2 terminated: Turn-Around-Time = 3, Wait time = 2\n\
             \n\
             --- Simulation Summary ---\n\
             CPU Utilization: 66.67%\n\
             Average Turnaround Time: 3.00\n\
             Average Wait Time: 2.00\n"
        );
    }
}
