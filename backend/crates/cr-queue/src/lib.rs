pub mod delivery;
pub mod error;
pub mod in_memory_job_queue;
pub mod job_handle;
pub mod job_queue;

pub use delivery::Delivery;
pub use error::{QueueError, Result as QueueResult};
pub use in_memory_job_queue::InMemoryJobQueue;
pub use job_handle::JobHandle;
pub use job_queue::JobQueue;

#[cfg(test)]
mod tests;
