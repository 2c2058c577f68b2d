//! Background jobs: the poll scheduler and the refresh job it drives.

pub mod refresh;
pub mod scheduler;

pub use refresh::RefreshJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
