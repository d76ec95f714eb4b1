//! Query refresh jobs: submit, poll until terminal, fetch rows.
//!
//! Polling is unbounded by default. [`PollOptions::deadline`] is an opt-in
//! limit on the total time spent waiting.

use crate::api::models::{Job, JobEnvelope, JobStatus, QueryResultEnvelope, Row};
use crate::api::transport::{ClientConfig, Transport};
use crate::error::{ApiError, AppError, JobError};
use serde_json::{Map, Value, json};
use std::time::{Duration, Instant};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub struct PollOptions {
    /// Sleep between two status checks.
    pub interval: Duration,
    /// Give up once this much time has passed since polling started.
    pub deadline: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
        }
    }
}

impl PollOptions {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

pub async fn fetch_job(transport: &Transport, job_id: &str) -> Result<Job, AppError> {
    let envelope: JobEnvelope = transport.get_json(&format!("jobs/{}", job_id)).await?;
    Ok(envelope.job)
}

/// Poll `jobs/{id}` until the job reports success or failure.
pub async fn poll_job(
    transport: &Transport,
    mut job: Job,
    options: &PollOptions,
) -> Result<Job, AppError> {
    let started = Instant::now();

    while !job.status.is_terminal() {
        if let Some(deadline) = options.deadline
            && started.elapsed() >= deadline
        {
            return Err(JobError::DeadlineExceeded {
                job_id: job.id,
                waited: started.elapsed(),
            }
            .into());
        }

        job = fetch_job(transport, &job.id).await?;
        log::debug!("Job {} status {}", job.id, job.status.code());

        if !job.status.is_terminal() {
            tokio::time::sleep(options.interval).await;
        }
    }

    Ok(job)
}

/// POST `queries/{id}/results` with `max_age = 0`; returns the created job.
pub async fn submit_refresh(
    transport: &Transport,
    query_id: u64,
    parameters: &Map<String, Value>,
) -> Result<Job, AppError> {
    let payload = json!({ "max_age": 0, "parameters": parameters });
    let path = format!("queries/{}/results", query_id);

    match transport.post_json::<JobEnvelope, _>(&path, Some(&payload)).await {
        Ok(envelope) => Ok(envelope.job),
        Err(ApiError::Endpoint { status, .. }) => {
            Err(JobError::SubmissionFailed { query_id, status }.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET `queries/{id}/results/{result_id}.json` and return its rows.
pub async fn fetch_result_rows(
    transport: &Transport,
    query_id: u64,
    result_id: u64,
) -> Result<Vec<Row>, AppError> {
    let path = format!("queries/{}/results/{}.json", query_id, result_id);

    match transport.get_json::<QueryResultEnvelope>(&path).await {
        Ok(envelope) => Ok(envelope.query_result.data.rows),
        Err(ApiError::Endpoint { status, .. }) => Err(JobError::ResultFetch {
            query_id,
            result_id,
            status,
        }
        .into()),
        Err(e) => Err(e.into()),
    }
}

/// Submit a refresh, wait for it and return the result rows.
pub async fn refresh_query_results(
    transport: &Transport,
    query_id: u64,
    parameters: &Map<String, Value>,
    options: &PollOptions,
) -> Result<Vec<Row>, AppError> {
    let job = submit_refresh(transport, query_id, parameters).await?;
    log::info!("Refreshing query {} (job {})", query_id, job.id);

    let job = poll_job(transport, job, options).await?;

    match (job.status, job.query_result_id) {
        (JobStatus::Success, Some(result_id)) => {
            fetch_result_rows(transport, query_id, result_id).await
        }
        _ => Err(JobError::Failed {
            job_id: job.id,
            error: job.error,
        }
        .into()),
    }
}

/// One-off refresh over a disposable connection; no credential check.
pub async fn fresh_query_result(
    config: &ClientConfig,
    query_id: u64,
    parameters: &Map<String, Value>,
    options: &PollOptions,
) -> Result<Vec<Row>, AppError> {
    let transport = Transport::new(config)?;
    refresh_query_results(&transport, query_id, parameters, options).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_options_default_is_unbounded() {
        let options = PollOptions::default();
        assert_eq!(options.interval, Duration::from_secs(1));
        assert!(options.deadline.is_none());
    }

    #[test]
    fn test_poll_options_builders() {
        let options = PollOptions::default()
            .with_interval(Duration::from_millis(250))
            .with_deadline(Duration::from_secs(60));
        assert_eq!(options.interval, Duration::from_millis(250));
        assert_eq!(options.deadline, Some(Duration::from_secs(60)));
    }

    #[tokio::test]
    async fn test_poll_job_returns_terminal_job_without_requests() {
        // Host is never contacted because the job is already finished.
        let transport = Transport::new(&ClientConfig::new("http://127.0.0.1:9", "key"))
            .expect("transport creation failed");
        let job = Job {
            id: "done".to_string(),
            status: JobStatus::Success,
            query_result_id: Some(1),
            error: None,
        };

        let polled = poll_job(&transport, job, &PollOptions::default())
            .await
            .expect("terminal job must be returned as is");
        assert_eq!(polled.id, "done");
    }
}
