//! Interaction driver for one product line's panel.
//!
//! The panel keeps its own copy of the jobs it fetched. That copy is
//! independent of the store collection for the same product line and the
//! two may disagree.

use crate::{ErrorInfo, JobRecord, Notification, ProductLine, Timestamp};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelMsg {
    ToggleExpansion,
    SinceDateChanged(Timestamp),
    JobsLoaded(Vec<JobRecord>),
    JobsFailed(ErrorInfo),
    RowClicked(JobRecord),
    HoverIn(JobRecord),
    HoverOut(JobRecord),
    PanToRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEffect {
    /// Request the jobs of this panel's product line created after `since_date`.
    FetchJobs { since_date: Timestamp },
    Notify(Notification),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductLinePanel {
    product_line: ProductLine,
    is_expanded: bool,
    since_date: Timestamp,
    selected_jobs: Vec<JobRecord>,
    jobs: Vec<JobRecord>,
    is_fetching_jobs: bool,
    error: Option<ErrorInfo>,
}

impl ProductLinePanel {
    /// New collapsed panel whose window defaults to the last 24 hours before `now`.
    pub fn new(product_line: ProductLine, now: Timestamp) -> Self {
        Self {
            product_line,
            is_expanded: false,
            since_date: crate::window::last_24_hours(now),
            selected_jobs: Vec::new(),
            jobs: Vec::new(),
            is_fetching_jobs: false,
            error: None,
        }
    }

    pub fn product_line(&self) -> &ProductLine {
        &self.product_line
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn since_date(&self) -> Timestamp {
        self.since_date
    }

    pub fn selected_job(&self) -> Option<&JobRecord> {
        self.selected_jobs.first()
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn is_fetching_jobs(&self) -> bool {
        self.is_fetching_jobs
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    /// Jobs passing the date filter for the current window, in stored order.
    pub fn visible_jobs(&self) -> impl Iterator<Item = &JobRecord> {
        let since = self.since_date;
        self.jobs.iter().filter(move |job| is_visible(job, since))
    }

    pub(crate) fn replace_product_line(&mut self, product_line: ProductLine) {
        self.product_line = product_line;
    }

    pub fn update(mut self, msg: PanelMsg) -> (Self, Vec<PanelEffect>) {
        let effects = match msg {
            PanelMsg::ToggleExpansion => {
                self.is_expanded = !self.is_expanded;
                if self.is_expanded {
                    vec![self.begin_fetch()]
                } else if !self.selected_jobs.is_empty() {
                    self.selected_jobs.clear();
                    vec![PanelEffect::Notify(Notification::JobDeselected)]
                } else {
                    Vec::new()
                }
            }
            PanelMsg::SinceDateChanged(since_date) => {
                let changed = since_date != self.since_date;
                self.since_date = since_date;
                if self.is_expanded && changed {
                    vec![self.begin_fetch()]
                } else {
                    Vec::new()
                }
            }
            PanelMsg::JobsLoaded(jobs) => {
                self.jobs = jobs;
                self.is_fetching_jobs = false;
                self.error = None;
                Vec::new()
            }
            PanelMsg::JobsFailed(error) => {
                self.error = Some(error);
                self.is_fetching_jobs = false;
                Vec::new()
            }
            PanelMsg::RowClicked(job) => {
                let already_selected = self
                    .selected_jobs
                    .iter()
                    .any(|selected| selected.id() == job.id());
                if already_selected {
                    self.selected_jobs.clear();
                    vec![PanelEffect::Notify(Notification::JobDeselected)]
                } else {
                    self.selected_jobs = vec![job.clone()];
                    vec![PanelEffect::Notify(Notification::JobSelected(job))]
                }
            }
            PanelMsg::HoverIn(job) => vec![PanelEffect::Notify(Notification::JobHoverIn(job))],
            PanelMsg::HoverOut(job) => vec![PanelEffect::Notify(Notification::JobHoverOut(job))],
            PanelMsg::PanToRequested => vec![PanelEffect::Notify(Notification::PanTo(
                self.product_line.clone(),
            ))],
        };

        (self, effects)
    }

    fn begin_fetch(&mut self) -> PanelEffect {
        self.is_fetching_jobs = true;
        PanelEffect::FetchJobs {
            since_date: self.since_date,
        }
    }
}

/// A record is shown while its import is in flight, or when it was created
/// strictly after `since`. Bare shells without a payload are never shown.
pub fn is_visible(record: &JobRecord, since: Timestamp) -> bool {
    match record {
        JobRecord::Placeholder { loading, .. } => *loading,
        JobRecord::Full(job) => job.created_on > since,
    }
}
