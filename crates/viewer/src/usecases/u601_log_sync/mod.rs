pub mod accumulation;
pub mod error;
pub mod executor;
pub mod log_api_client;
pub mod pagination;
pub mod scheduler;
pub mod signature;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::SyncError;
pub use log_api_client::{HttpLogSource, HttpTimeouts, RemoteLogSource, RetryPolicy};
pub use scheduler::{FetchOutcome, FetchTicket, SchedulerSettings, SyncScheduler};
