use crate::api::client::VenomicsClient;
use crate::api::models::{Job, JobEnvelope, Page, Query, Row};
use crate::core::jobs::{self, PollOptions};
use crate::core::pagination::{PageRequest, paginate};
use crate::error::AppError;
use crate::utils::error_helpers::convert_json_error;
use serde_json::{Map, Value, json};

impl VenomicsClient {
    /// GET `queries` (or `queries/favorites`), one page.
    pub async fn queries(
        &self,
        page: PageRequest,
        only_favorites: bool,
    ) -> Result<Page<Query>, AppError> {
        let path = if only_favorites {
            "queries/favorites"
        } else {
            "queries"
        };
        Ok(self.transport().get_json_with_query(path, &page).await?)
    }

    /// Every query visible to the API key, across all pages.
    pub async fn all_queries(&self) -> Result<Vec<Query>, AppError> {
        paginate(
            move |page| self.queries(page, false),
            self.first_page(),
        )
        .await
    }

    pub async fn query(&self, query_id: u64) -> Result<Query, AppError> {
        Ok(self
            .transport()
            .get_json(&format!("queries/{}", query_id))
            .await?)
    }

    /// POST `queries/{id}` with an arbitrary property patch.
    pub async fn update_query(&self, query_id: u64, patch: &Value) -> Result<Query, AppError> {
        Ok(self
            .transport()
            .post_json(&format!("queries/{}", query_id), Some(patch))
            .await?)
    }

    pub async fn fork_query(&self, query_id: u64) -> Result<Query, AppError> {
        Ok(self
            .transport()
            .post_json::<_, Value>(&format!("queries/{}/fork", query_id), None)
            .await?)
    }

    /// Fork a query, renaming the copy when `new_name` is given.
    pub async fn duplicate_query(
        &self,
        query_id: u64,
        new_name: Option<&str>,
    ) -> Result<Query, AppError> {
        let forked = self.fork_query(query_id).await?;
        log::info!("Forked query {} into {}", query_id, forked.id);

        match new_name.filter(|name| !name.is_empty()) {
            Some(name) => self.update_query(forked.id, &json!({ "name": name })).await,
            None => Ok(forked),
        }
    }

    /// POST `queries/{id}/refresh`; returns the job without waiting for it.
    pub async fn refresh_query(&self, query_id: u64) -> Result<Job, AppError> {
        let envelope: JobEnvelope = self
            .transport()
            .post_json::<_, Value>(&format!("queries/{}/refresh", query_id), None)
            .await?;
        Ok(envelope.job)
    }

    pub async fn favorite_query(&self, query_id: u64) -> Result<(), AppError> {
        self.transport()
            .post(&format!("queries/{}/favorite", query_id), Some(&json!({})))
            .await?;
        Ok(())
    }

    /// All queries that have a schedule.
    pub async fn scheduled_queries(&self) -> Result<Vec<Query>, AppError> {
        Ok(filter_scheduled(self.all_queries().await?))
    }

    /// Raw body of a cached query result.
    pub async fn query_result_text(&self, result_id: u64) -> Result<String, AppError> {
        let path = format!("query_results/{}", result_id);
        let response = self.transport().get(&path).await?;
        response
            .text()
            .await
            .map_err(|e| AppError::Api(convert_json_error(e, &path)))
    }

    /// Execute a query with `parameters`, wait for the job and return its rows.
    pub async fn refresh_query_results(
        &self,
        query_id: u64,
        parameters: &Map<String, Value>,
        options: &PollOptions,
    ) -> Result<Vec<Row>, AppError> {
        jobs::refresh_query_results(self.transport(), query_id, parameters, options).await
    }

    pub async fn job(&self, job_id: &str) -> Result<Job, AppError> {
        jobs::fetch_job(self.transport(), job_id).await
    }
}

/// Keep only queries with a schedule.
pub fn filter_scheduled(queries: Vec<Query>) -> Vec<Query> {
    queries.into_iter().filter(Query::is_scheduled).collect()
}
