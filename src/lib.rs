pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::SchedCoreEvent;
pub use error::SimError;
pub use scheduler::{Quantum, Scheduler};
pub use sim::{JobSpec, Sim, SimReport};
