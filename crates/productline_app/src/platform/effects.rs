use chrono::Utc;
use productline_core::{
    CollectionAction, Effect, JobRecord, Msg, Notification, PanelMsg, StoreAction, Timestamp,
};
use productline_engine::{EngineEvent, EngineHandle};
use productline_logging::{sync_info, sync_warn};

/// Receiver of selection, hover and pan notifications (the map view).
pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification);
}

/// Prints notifications where a map view would highlight geometry.
pub struct ConsoleMapSink;

impl NotificationSink for ConsoleMapSink {
    fn notify(&mut self, notification: &Notification) {
        let line = match notification {
            Notification::JobSelected(job) => format!("map: select job {}", job.id()),
            Notification::JobDeselected => "map: clear selection".to_string(),
            Notification::JobHoverIn(job) => format!("map: highlight job {}", job.id()),
            Notification::JobHoverOut(job) => format!("map: unhighlight job {}", job.id()),
            Notification::PanTo(line) => format!("map: pan to product line {}", line.name),
        };
        println!("{line}");
    }
}

pub struct EffectRunner<S: NotificationSink> {
    engine: EngineHandle,
    sink: S,
}

impl<S: NotificationSink> EffectRunner<S> {
    pub fn new(engine: EngineHandle, sink: S) -> Self {
        Self { engine, sink }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchProductLines => {
                    sync_info!("FetchProductLines");
                    self.engine.fetch_product_lines();
                }
                Effect::FetchJobIds {
                    product_line_id,
                    since_date,
                } => {
                    sync_info!("FetchJobIds product_line={} since={}", product_line_id, since_date);
                    self.engine.fetch_job_ids(product_line_id, since_date);
                }
                Effect::FetchJobs {
                    product_line_id,
                    since_date,
                } => {
                    sync_info!("FetchJobs product_line={} since={}", product_line_id, since_date);
                    self.engine.fetch_jobs(product_line_id, since_date);
                }
                Effect::Notify(notification) => self.sink.notify(&notification),
            }
        }
    }

    /// Drains completed engine work into messages for the reducer.
    pub fn poll_events(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(|event| map_event(event, Utc::now()))
            .collect()
    }
}

pub(crate) fn map_event(event: EngineEvent, received_at: Timestamp) -> Msg {
    match event {
        EngineEvent::ProductLinesFetched(Ok(records)) => Msg::ProductLinesLoaded {
            records,
            received_at,
        },
        EngineEvent::ProductLinesFetched(Err(error)) => {
            sync_warn!("Product line load failed: {}", error);
            Msg::ProductLinesFailed(error)
        }
        EngineEvent::JobIdsFetched {
            product_line_id,
            result,
            ..
        } => {
            let action = match result {
                Ok(job_ids) => CollectionAction::FetchSucceeded { job_ids },
                Err(error) => CollectionAction::FetchFailed { error },
            };
            Msg::Store(StoreAction::Route {
                product_line_id,
                action,
            })
        }
        EngineEvent::JobsFetched {
            product_line_id,
            result,
            ..
        } => {
            let msg = match result {
                Ok(jobs) => PanelMsg::JobsLoaded(jobs.into_iter().map(JobRecord::Full).collect()),
                Err(error) => PanelMsg::JobsFailed(error),
            };
            Msg::Panel {
                product_line_id,
                msg,
            }
        }
        EngineEvent::ImportStarted {
            product_line_id,
            job_id,
        } => Msg::Store(StoreAction::Route {
            product_line_id,
            action: CollectionAction::BeginImport { job_id },
        }),
        EngineEvent::ImportCompleted {
            product_line_id,
            job_id,
            result,
        } => {
            let action = match result {
                Ok(job) => CollectionAction::ImportSucceeded { job },
                Err(error) => {
                    sync_warn!("Import of job {} failed: {}", job_id, error);
                    CollectionAction::ImportFailed { job_id, error }
                }
            };
            Msg::Store(StoreAction::Route {
                product_line_id,
                action,
            })
        }
    }
}
