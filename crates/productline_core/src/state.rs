use std::collections::BTreeMap;

use crate::product_line::{format_date, title_case};
use crate::view_model::{AppViewModel, CollectionSummary, JobRowView, MetadataRow, PanelView};
use crate::window::since_date_options;
use crate::{
    CollectionAction, ErrorInfo, JobRecord, PanelEffect, PanelMsg, ProductLine, ProductLineId,
    ProductLineJobCollection, ProductLineJobsStore, ProductLinePanel, StoreAction, Timestamp,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    product_lines: Vec<ProductLine>,
    store: ProductLineJobsStore,
    panels: BTreeMap<ProductLineId, ProductLinePanel>,
    fetching_product_lines: bool,
    load_error: Option<ErrorInfo>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product_lines(&self) -> &[ProductLine] {
        &self.product_lines
    }

    pub fn store(&self) -> &ProductLineJobsStore {
        &self.store
    }

    pub fn panel(&self, product_line_id: &str) -> Option<&ProductLinePanel> {
        self.panels.get(product_line_id)
    }

    pub fn is_fetching_product_lines(&self) -> bool {
        self.fetching_product_lines
    }

    pub fn load_error(&self) -> Option<&ErrorInfo> {
        self.load_error.as_ref()
    }

    pub fn view(&self, now: Timestamp) -> AppViewModel {
        AppViewModel {
            fetching_product_lines: self.fetching_product_lines,
            load_error: self.load_error.as_ref().map(|err| err.message.clone()),
            panels: self
                .product_lines
                .iter()
                .filter_map(|line| {
                    let panel = self.panels.get(&line.id)?;
                    Some(panel_view(panel, self.store.get(&line.id), now))
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_product_line_load(&mut self) {
        self.fetching_product_lines = true;
        self.mark_dirty();
    }

    pub(crate) fn fail_product_line_load(&mut self, error: ErrorInfo) {
        self.fetching_product_lines = false;
        self.load_error = Some(error);
        self.mark_dirty();
    }

    /// Replaces the known product lines. The store is reset wholesale; panels
    /// of surviving product lines keep their local state.
    pub(crate) fn provision(&mut self, records: Vec<ProductLine>, received_at: Timestamp) {
        let store = std::mem::take(&mut self.store);
        self.store = store.reduce(StoreAction::Provision {
            product_line_ids: records.iter().map(|line| line.id.clone()).collect(),
        });

        let mut previous = std::mem::take(&mut self.panels);
        for line in &records {
            let panel = match previous.remove(&line.id) {
                Some(mut panel) => {
                    panel.replace_product_line(line.clone());
                    panel
                }
                None => ProductLinePanel::new(line.clone(), received_at),
            };
            self.panels.insert(line.id.clone(), panel);
        }

        self.product_lines = records;
        self.fetching_product_lines = false;
        self.load_error = None;
        self.mark_dirty();
    }

    pub(crate) fn reduce_store(&mut self, action: StoreAction) {
        let store = std::mem::take(&mut self.store);
        self.store = store.reduce(action);
        self.mark_dirty();
    }

    pub(crate) fn route(&mut self, product_line_id: ProductLineId, action: CollectionAction) {
        self.reduce_store(StoreAction::Route {
            product_line_id,
            action,
        });
    }

    /// Runs a panel transition. Returns `None` when no panel exists for the id.
    pub(crate) fn update_panel(
        &mut self,
        product_line_id: &str,
        msg: PanelMsg,
    ) -> Option<Vec<PanelEffect>> {
        let panel = self.panels.remove(product_line_id)?;
        let (panel, effects) = panel.update(msg);
        self.panels.insert(product_line_id.to_owned(), panel);
        self.mark_dirty();
        Some(effects)
    }
}

fn panel_view(
    panel: &ProductLinePanel,
    collection: Option<&ProductLineJobCollection>,
    now: Timestamp,
) -> PanelView {
    let line = panel.product_line();
    let selected_id = panel.selected_job().map(JobRecord::id);

    let mut visible: Vec<&JobRecord> = panel.visible_jobs().collect();
    // Stable sort: in-flight placeholders first, then newest records first.
    visible.sort_by(|a, b| {
        b.is_loading()
            .cmp(&a.is_loading())
            .then(b.created_on().cmp(&a.created_on()))
    });

    let jobs = visible
        .into_iter()
        .map(|record| {
            let job = record.as_job();
            JobRowView {
                job_id: record.id().to_owned(),
                name: job.and_then(|job| job.name.clone()),
                status: job.and_then(|job| job.status.clone()),
                created_on: record.created_on(),
                loading: record.is_loading(),
                selected: selected_id == Some(record.id()),
            }
        })
        .collect();

    PanelView {
        product_line_id: line.id.clone(),
        title: line.name.clone(),
        is_expanded: panel.is_expanded(),
        metadata: metadata_rows(line),
        is_loading: panel.is_fetching_jobs(),
        error: panel.error().map(|err| err.message.clone()),
        jobs,
        since_date: panel.since_date(),
        since_dates: since_date_options(line, now),
        collection: collection.map(collection_summary).unwrap_or_default(),
    }
}

fn metadata_rows(line: &ProductLine) -> Vec<MetadataRow> {
    let expires = line
        .expires_on
        .map(format_date)
        .unwrap_or_else(|| "Forever".to_owned());
    let spatial_filter = line
        .spatial_filter_name
        .as_deref()
        .map(title_case)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "None".to_owned());

    vec![
        MetadataRow::new(
            "Scheduling",
            format!("{} \u{2014} {}", format_date(line.starts_on), expires),
        ),
        MetadataRow::new("Algorithm", line.algorithm_name.clone()),
        MetadataRow::new("Cloud Cover", format!("{}% or less", line.image_cloud_cover)),
        MetadataRow::new("Spatial Filter", spatial_filter),
        MetadataRow::new("Owner", line.owner.clone()),
        MetadataRow::new("Date Created", format_date(line.created_on)),
    ]
}

fn collection_summary(collection: &ProductLineJobCollection) -> CollectionSummary {
    CollectionSummary {
        status: collection.status(),
        record_count: collection.records().len(),
        loading_count: collection
            .records()
            .iter()
            .filter(|record| record.is_loading())
            .count(),
        since_date: collection.since_date(),
        error: collection.error().map(|err| err.message.clone()),
    }
}
