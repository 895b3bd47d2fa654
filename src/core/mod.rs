pub mod driver;
pub mod event;
pub mod observer;
pub mod queue;
pub mod state;
pub mod stats;

pub use driver::SchedCore;
pub use event::SchedCoreEvent;
pub use queue::{Event, EventId, EventKind, EventQueue, event_order};
pub use state::{Job, JobId, JobState, OnCpu, ReadyQueue, SimCtx, Ticks};
pub use stats::{CompletedJob, StatsCollector, Summary};
