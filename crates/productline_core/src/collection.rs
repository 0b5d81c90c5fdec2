//! Per-product-line job collection.
//!
//! A collection is a value: every transition consumes the old state and
//! returns the new one. Record order is whatever the last successful fetch
//! established; import transitions patch records in place by id and never
//! insert or resort.

use std::collections::HashSet;

use crate::{ErrorInfo, Job, JobId, JobRecord, Timestamp};

/// Transition requests understood by a single collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionAction {
    BeginFetch { since_date: Timestamp },
    FetchSucceeded { job_ids: Vec<JobId> },
    FetchFailed { error: ErrorInfo },
    BeginImport { job_id: JobId },
    ImportSucceeded { job: Job },
    ImportFailed { job_id: JobId, error: ErrorInfo },
}

impl CollectionAction {
    pub fn name(&self) -> &'static str {
        match self {
            CollectionAction::BeginFetch { .. } => "BeginFetch",
            CollectionAction::FetchSucceeded { .. } => "FetchSucceeded",
            CollectionAction::FetchFailed { .. } => "FetchFailed",
            CollectionAction::BeginImport { .. } => "BeginImport",
            CollectionAction::ImportSucceeded { .. } => "ImportSucceeded",
            CollectionAction::ImportFailed { .. } => "ImportFailed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionStatus {
    #[default]
    Idle,
    Fetching,
    FetchError,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductLineJobCollection {
    fetching: bool,
    since_date: Option<Timestamp>,
    records: Vec<JobRecord>,
    error: Option<ErrorInfo>,
}

impl ProductLineJobCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<JobRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn since_date(&self) -> Option<Timestamp> {
        self.since_date
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn record(&self, job_id: &str) -> Option<&JobRecord> {
        self.records.iter().find(|record| record.id() == job_id)
    }

    pub fn status(&self) -> CollectionStatus {
        if self.fetching {
            CollectionStatus::Fetching
        } else if self.error.is_some() {
            CollectionStatus::FetchError
        } else {
            CollectionStatus::Idle
        }
    }

    /// Applies one transition and returns the resulting collection.
    pub fn apply(mut self, action: CollectionAction) -> Self {
        match action {
            CollectionAction::BeginFetch { since_date } => {
                // Existing records and error stay visible until the fetch resolves.
                self.fetching = true;
                self.since_date = Some(since_date);
            }
            CollectionAction::FetchSucceeded { job_ids } => {
                self.fetching = false;
                self.error = None;
                // Ids are unique within a collection; repeats keep their first position.
                let mut seen = HashSet::new();
                self.records = job_ids
                    .into_iter()
                    .filter(|id| seen.insert(id.clone()))
                    .map(JobRecord::shell)
                    .collect();
            }
            CollectionAction::FetchFailed { error } => {
                self.fetching = false;
                self.error = Some(error);
            }
            CollectionAction::BeginImport { job_id } => {
                for record in &mut self.records {
                    let matches = match record {
                        JobRecord::Placeholder { id, .. } => *id == job_id,
                        JobRecord::Full(job) => job.id == job_id,
                    };
                    if matches {
                        *record = JobRecord::loading(job_id.clone());
                    }
                }
            }
            CollectionAction::ImportSucceeded { job } => {
                let position = self.records.iter().position(|record| match record {
                    JobRecord::Placeholder { id, .. } => *id == job.id,
                    JobRecord::Full(existing) => existing.id == job.id,
                });
                if let Some(index) = position {
                    self.records[index] = JobRecord::Full(job);
                }
            }
            CollectionAction::ImportFailed { job_id, error } => {
                self.records.retain(|record| match record {
                    JobRecord::Placeholder { id, .. } => *id != job_id,
                    JobRecord::Full(job) => job.id != job_id,
                });
                self.error = Some(error);
            }
        }
        self
    }
}
