//! Bulk export of query sources to `.sql` files.

use crate::AppError;
use crate::api::client::VenomicsClient;
use crate::api::models::Query;
use crate::utils::file::{ensure_directory_exists, write_text_file};
use std::path::{Path, PathBuf};

/// `query_{id}.sql`
pub fn export_file_name(query: &Query) -> String {
    format!("query_{}.sql", query.id)
}

/// Comment header followed by the query text. `updated_at` is written as received.
pub fn render_query_file(query: &Query) -> String {
    let data_source = query
        .data_source_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    let author = query.user.as_ref().map(|u| u.name.as_str()).unwrap_or_default();

    format!(
        "/*\nName: {}\nData source: {}\nCreated By: {}\nLast Updated At: {}\n*/\n{}",
        query.name,
        data_source,
        author,
        query.updated_at.as_deref().unwrap_or_default(),
        query.query_text
    )
}

pub struct QueryExporter {
    output_dir: PathBuf,
}

impl QueryExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one file, replacing an earlier export of the same query.
    pub fn write_query(&self, query: &Query) -> Result<PathBuf, AppError> {
        ensure_directory_exists(&self.output_dir)?;
        let path = self.output_dir.join(export_file_name(query));
        write_text_file(&path, &render_query_file(query))?;
        log::debug!("Exported query {} to {}", query.id, path.display());
        Ok(path)
    }

    pub fn write_all(&self, queries: &[Query]) -> Result<Vec<PathBuf>, AppError> {
        queries.iter().map(|q| self.write_query(q)).collect()
    }

    /// Fetch every query and write one file per query.
    pub async fn export(&self, client: &VenomicsClient) -> Result<Vec<PathBuf>, AppError> {
        let queries = client.all_queries().await?;
        log::info!(
            "Exporting {} queries to {}",
            queries.len(),
            self.output_dir.display()
        );
        self.write_all(&queries)
    }
}
