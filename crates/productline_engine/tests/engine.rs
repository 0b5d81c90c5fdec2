use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use productline_core::{Job, JobId, ProductLine, Timestamp};
use productline_engine::{ClientError, EngineEvent, EngineHandle, JobsClient};
use pretty_assertions::assert_eq;

fn ts(raw: &str) -> Timestamp {
    raw.parse().expect("rfc3339 timestamp")
}

/// Client whose answers and latencies are fixed per request key.
#[derive(Default)]
struct ScriptedClient {
    delays: HashMap<String, Duration>,
    job_ids: HashMap<String, Vec<JobId>>,
    jobs: HashMap<String, Job>,
}

impl ScriptedClient {
    async fn pause(&self, key: &str) {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait::async_trait]
impl JobsClient for ScriptedClient {
    async fn list_product_lines(&self) -> Result<Vec<ProductLine>, ClientError> {
        self.pause("product_lines").await;
        Ok(vec![ProductLine::new(
            "pl-1",
            "Coastline",
            ts("2023-06-01T08:30:00Z"),
        )])
    }

    async fn list_job_ids(
        &self,
        product_line_id: &str,
        since: Timestamp,
    ) -> Result<Vec<JobId>, ClientError> {
        let key = format!("{product_line_id}@{}", since.to_rfc3339());
        self.pause(&key).await;
        self.job_ids
            .get(&key)
            .cloned()
            .ok_or_else(|| ClientError::InvalidUrl(key))
    }

    async fn list_jobs(
        &self,
        _product_line_id: &str,
        _since: Timestamp,
    ) -> Result<Vec<Job>, ClientError> {
        Ok(self.jobs.values().cloned().collect())
    }

    async fn fetch_job(&self, job_id: &str) -> Result<Job, ClientError> {
        self.pause(job_id).await;
        self.jobs
            .get(job_id)
            .cloned()
            .ok_or_else(|| ClientError::HttpStatus {
                status: 404,
                url: format!("/v0/job/{job_id}"),
            })
    }
}

fn collect(engine: &EngineHandle, count: usize) -> Vec<EngineEvent> {
    (0..count)
        .map(|_| {
            engine
                .recv_timeout(Duration::from_secs(5))
                .expect("engine event")
        })
        .collect()
}

#[test]
fn product_lines_are_reported() {
    let engine = EngineHandle::new(Arc::new(ScriptedClient::default())).unwrap();
    engine.fetch_product_lines();

    match collect(&engine, 1).remove(0) {
        EngineEvent::ProductLinesFetched(Ok(lines)) => assert_eq!(lines[0].id, "pl-1"),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn overlapping_fetches_complete_out_of_order() {
    let early = ts("2024-01-01T00:00:00Z");
    let late = ts("2024-01-20T00:00:00Z");
    let early_key = format!("pl-1@{}", early.to_rfc3339());
    let late_key = format!("pl-1@{}", late.to_rfc3339());

    let mut client = ScriptedClient::default();
    client.delays.insert(early_key.clone(), Duration::from_millis(300));
    client
        .job_ids
        .insert(early_key, vec!["old".to_string(), "recent".to_string()]);
    client.job_ids.insert(late_key, vec!["recent".to_string()]);

    let engine = EngineHandle::new(Arc::new(client)).unwrap();
    engine.fetch_job_ids("pl-1", early);
    engine.fetch_job_ids("pl-1", late);

    let windows: Vec<_> = collect(&engine, 2)
        .into_iter()
        .map(|event| match event {
            EngineEvent::JobIdsFetched {
                since_date, result, ..
            } => (since_date, result.expect("ids")),
            other => panic!("unexpected event {other:?}"),
        })
        .collect();

    assert_eq!(windows[0], (late, vec!["recent".to_string()]));
    assert_eq!(
        windows[1],
        (early, vec!["old".to_string(), "recent".to_string()])
    );
}

#[test]
fn import_reports_start_then_completion() {
    let mut client = ScriptedClient::default();
    let job = Job::new("job-7", ts("2024-03-10T12:00:00Z"));
    client.jobs.insert("job-7".to_string(), job.clone());
    client
        .delays
        .insert("job-7".to_string(), Duration::from_millis(50));

    let engine = EngineHandle::new(Arc::new(client)).unwrap();
    engine.import_job("pl-1", "job-7");

    let events = collect(&engine, 2);
    assert_eq!(
        events,
        vec![
            EngineEvent::ImportStarted {
                product_line_id: "pl-1".to_string(),
                job_id: "job-7".to_string(),
            },
            EngineEvent::ImportCompleted {
                product_line_id: "pl-1".to_string(),
                job_id: "job-7".to_string(),
                result: Ok(job),
            },
        ]
    );
}

#[test]
fn failed_import_carries_normalized_error() {
    let engine = EngineHandle::new(Arc::new(ScriptedClient::default())).unwrap();
    engine.import_job("pl-1", "ghost");

    let events = collect(&engine, 2);
    match &events[1] {
        EngineEvent::ImportCompleted {
            job_id,
            result: Err(error),
            ..
        } => {
            assert_eq!(job_id, "ghost");
            assert!(error.message.starts_with("http status 404"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn shutdown_cancels_pending_requests() {
    let since = ts("2024-01-01T00:00:00Z");
    let key = format!("pl-1@{}", since.to_rfc3339());
    let mut client = ScriptedClient::default();
    client.delays.insert(key.clone(), Duration::from_secs(30));
    client.job_ids.insert(key, vec!["a".to_string()]);

    let engine = EngineHandle::new(Arc::new(client)).unwrap();
    engine.fetch_job_ids("pl-1", since);
    std::thread::sleep(Duration::from_millis(50));
    engine.shutdown();

    match collect(&engine, 1).remove(0) {
        EngineEvent::JobIdsFetched {
            result: Err(error), ..
        } => assert_eq!(error.message, "cancelled"),
        other => panic!("unexpected event {other:?}"),
    }
}
