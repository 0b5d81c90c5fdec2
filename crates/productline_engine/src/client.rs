use std::time::Duration;

use productline_core::{Job, JobId, ProductLine, Timestamp};
use productline_logging::sync_debug;
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::{JobFeature, JobIdsEnvelope, JobsEnvelope, ProductLinesEnvelope};
use crate::ClientError;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Remote side of the job store. Retry policy, if any, belongs to implementors.
#[async_trait::async_trait]
pub trait JobsClient: Send + Sync {
    async fn list_product_lines(&self) -> Result<Vec<ProductLine>, ClientError>;

    /// Store path: identifiers of the jobs created after `since`, in server order.
    async fn list_job_ids(
        &self,
        product_line_id: &str,
        since: Timestamp,
    ) -> Result<Vec<JobId>, ClientError>;

    /// Panel path: full records of the jobs created after `since`.
    async fn list_jobs(&self, product_line_id: &str, since: Timestamp)
        -> Result<Vec<Job>, ClientError>;

    /// Import path: a single job discovered out-of-band.
    async fn fetch_job(&self, job_id: &str) -> Result<Job, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobsClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestJobsClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(settings.base_url.clone()));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(ClientError::Network)?;
        Ok(Self { base_url, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn jobs_endpoint(&self, product_line_id: &str, since: Timestamp) -> Result<Url, ClientError> {
        let mut url = self.endpoint(&["v0", "productline", product_line_id, "jobs"])?;
        url.query_pairs_mut()
            .append_pair("sinceDate", &since.to_rfc3339());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        sync_debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl JobsClient for ReqwestJobsClient {
    async fn list_product_lines(&self) -> Result<Vec<ProductLine>, ClientError> {
        let url = self.endpoint(&["v0", "productline"])?;
        let envelope: ProductLinesEnvelope = self.get_json(url).await?;
        Ok(envelope
            .product_lines
            .into_iter()
            .map(ProductLine::from)
            .collect())
    }

    async fn list_job_ids(
        &self,
        product_line_id: &str,
        since: Timestamp,
    ) -> Result<Vec<JobId>, ClientError> {
        let mut url = self.jobs_endpoint(product_line_id, since)?;
        url.query_pairs_mut().append_pair("fields", "id");
        let envelope: JobIdsEnvelope = self.get_json(url).await?;
        Ok(envelope.job_ids)
    }

    async fn list_jobs(
        &self,
        product_line_id: &str,
        since: Timestamp,
    ) -> Result<Vec<Job>, ClientError> {
        let url = self.jobs_endpoint(product_line_id, since)?;
        let envelope: JobsEnvelope = self.get_json(url).await?;
        Ok(envelope.jobs.into_iter().map(Job::from).collect())
    }

    async fn fetch_job(&self, job_id: &str) -> Result<Job, ClientError> {
        let url = self.endpoint(&["v0", "job", job_id])?;
        let feature: JobFeature = self.get_json(url).await?;
        Ok(feature.into())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout(err);
    }
    ClientError::Network(err)
}
