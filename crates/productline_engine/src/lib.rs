//! Product-line engine: async fetch/import collaborators and task execution.
mod client;
mod engine;
mod types;
mod wire;

pub use client::{ClientSettings, JobsClient, ReqwestJobsClient};
pub use engine::EngineHandle;
pub use types::{ClientError, EngineEvent};
