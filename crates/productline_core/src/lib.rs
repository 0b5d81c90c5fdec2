//! Product-line core: pure job-collection state machines and view-model helpers.
mod collection;
mod effect;
mod error;
mod job;
mod msg;
mod panel;
mod product_line;
mod state;
mod store;
mod update;
mod view_model;
mod window;

pub use collection::{CollectionAction, CollectionStatus, ProductLineJobCollection};
pub use effect::{Effect, Notification};
pub use error::ErrorInfo;
pub use job::{Job, JobId, JobRecord, Timestamp};
pub use msg::Msg;
pub use panel::{is_visible, PanelEffect, PanelMsg, ProductLinePanel};
pub use product_line::{ProductLine, ProductLineId};
pub use state::AppState;
pub use store::{ProductLineJobsStore, StoreAction};
pub use update::update;
pub use view_model::{AppViewModel, CollectionSummary, JobRowView, MetadataRow, PanelView};
pub use window::{last_24_hours, last_30_days, last_7_days, since_date_options, SinceDateOption};
