use std::future::Future;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use productline_core::{ErrorInfo, JobId, ProductLineId, Timestamp};
use productline_logging::{sync_debug, sync_info, sync_warn};
use tokio_util::sync::CancellationToken;

use crate::{ClientError, EngineEvent, JobsClient};

enum EngineCommand {
    FetchProductLines,
    FetchJobIds {
        product_line_id: ProductLineId,
        since_date: Timestamp,
    },
    FetchJobs {
        product_line_id: ProductLineId,
        since_date: Timestamp,
    },
    ImportJob {
        product_line_id: ProductLineId,
        job_id: JobId,
    },
}

/// Runs fetch and import requests as independent tasks on a background
/// runtime. Each request reports back through [`EngineEvent`]s in the order
/// the tasks complete, which need not match the order they were issued in.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn JobsClient>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("productline-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                let token = token.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, &event_tx, &token).await;
                });
            }
            sync_debug!("engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            shutdown,
        })
    }

    pub fn fetch_product_lines(&self) {
        self.send(EngineCommand::FetchProductLines);
    }

    pub fn fetch_job_ids(&self, product_line_id: impl Into<ProductLineId>, since_date: Timestamp) {
        self.send(EngineCommand::FetchJobIds {
            product_line_id: product_line_id.into(),
            since_date,
        });
    }

    pub fn fetch_jobs(&self, product_line_id: impl Into<ProductLineId>, since_date: Timestamp) {
        self.send(EngineCommand::FetchJobs {
            product_line_id: product_line_id.into(),
            since_date,
        });
    }

    /// Pulls in a job discovered out-of-band. Emits `ImportStarted` before the
    /// job is requested and `ImportCompleted` once it resolves.
    pub fn import_job(&self, product_line_id: impl Into<ProductLineId>, job_id: impl Into<JobId>) {
        self.send(EngineCommand::ImportJob {
            product_line_id: product_line_id.into(),
            job_id: job_id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Cancels every outstanding task. Cancelled tasks still report, with a
    /// `cancelled` error, so callers never wait on them.
    pub fn shutdown(&self) {
        sync_info!("engine shutdown requested");
        self.shutdown.cancel();
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            sync_warn!("engine worker is gone; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_command(
    client: &dyn JobsClient,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
    token: &CancellationToken,
) {
    let event = match command {
        EngineCommand::FetchProductLines => {
            sync_debug!("fetching product lines");
            let result = cancellable(token, client.list_product_lines()).await;
            EngineEvent::ProductLinesFetched(normalize("product lines", result))
        }
        EngineCommand::FetchJobIds {
            product_line_id,
            since_date,
        } => {
            sync_debug!("fetching job ids for {} since {}", product_line_id, since_date);
            let request = client.list_job_ids(&product_line_id, since_date);
            let result = cancellable(token, request).await;
            EngineEvent::JobIdsFetched {
                result: normalize(&product_line_id, result),
                product_line_id,
                since_date,
            }
        }
        EngineCommand::FetchJobs {
            product_line_id,
            since_date,
        } => {
            sync_debug!("fetching jobs for {} since {}", product_line_id, since_date);
            let request = client.list_jobs(&product_line_id, since_date);
            let result = cancellable(token, request).await;
            EngineEvent::JobsFetched {
                result: normalize(&product_line_id, result),
                product_line_id,
                since_date,
            }
        }
        EngineCommand::ImportJob {
            product_line_id,
            job_id,
        } => {
            let _ = event_tx.send(EngineEvent::ImportStarted {
                product_line_id: product_line_id.clone(),
                job_id: job_id.clone(),
            });
            let result = cancellable(token, client.fetch_job(&job_id)).await;
            EngineEvent::ImportCompleted {
                result: normalize(&job_id, result),
                product_line_id,
                job_id,
            }
        }
    };
    let _ = event_tx.send(event);
}

async fn cancellable<T>(
    token: &CancellationToken,
    request: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError> {
    tokio::select! {
        _ = token.cancelled() => Err(ClientError::Cancelled),
        result = request => result,
    }
}

fn normalize<T>(subject: &str, result: Result<T, ClientError>) -> Result<T, ErrorInfo> {
    result.map_err(|err| {
        sync_warn!("request for {} failed: {}", subject, err);
        err.to_error_info()
    })
}
