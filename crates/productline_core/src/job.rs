use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type JobId = String;
pub type Timestamp = DateTime<Utc>;

/// A fully materialized job belonging to a product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub created_on: Timestamp,
    pub name: Option<String>,
    pub status: Option<String>,
    /// Remaining job properties as delivered by the server.
    pub properties: Map<String, Value>,
    pub geometry: Option<Value>,
}

impl Job {
    pub fn new(id: impl Into<JobId>, created_on: Timestamp) -> Self {
        Self {
            id: id.into(),
            created_on,
            name: None,
            status: None,
            properties: Map::new(),
            geometry: None,
        }
    }
}

/// One entry of a job collection: either a known id awaiting its payload or
/// the full record. A placeholder and the full record that replaces it are
/// the same logical entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobRecord {
    Placeholder { id: JobId, loading: bool },
    Full(Job),
}

impl JobRecord {
    /// Bare shell as produced by a listing that only returns identifiers.
    pub fn shell(id: impl Into<JobId>) -> Self {
        JobRecord::Placeholder {
            id: id.into(),
            loading: false,
        }
    }

    /// Placeholder for a job whose import is in flight.
    pub fn loading(id: impl Into<JobId>) -> Self {
        JobRecord::Placeholder {
            id: id.into(),
            loading: true,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            JobRecord::Placeholder { id, .. } => id,
            JobRecord::Full(job) => &job.id,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, JobRecord::Placeholder { loading: true, .. })
    }

    pub fn created_on(&self) -> Option<Timestamp> {
        match self {
            JobRecord::Placeholder { .. } => None,
            JobRecord::Full(job) => Some(job.created_on),
        }
    }

    pub fn as_job(&self) -> Option<&Job> {
        match self {
            JobRecord::Placeholder { .. } => None,
            JobRecord::Full(job) => Some(job),
        }
    }
}

impl From<Job> for JobRecord {
    fn from(job: Job) -> Self {
        JobRecord::Full(job)
    }
}
