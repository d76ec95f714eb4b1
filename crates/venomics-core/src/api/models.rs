use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Custom deserializer: drops `null` tag entries and treats a `null` list as empty
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(tags.unwrap_or_default().into_iter().flatten().collect())
}

/// Custom deserializer: `null` strings become empty strings
fn deserialize_null_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a server timestamp: RFC 3339, or naive ISO assumed to be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Paginated list envelope. `page * page_size >= count` marks the last page.
#[derive(Debug, Deserialize, Clone)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub count: u64,
}

impl<T> Page<T> {
    /// True when this envelope reaches or passes the end of the collection.
    pub fn is_last(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) >= self.count
    }
}

// Query models
#[derive(Debug, Deserialize, Clone)]
pub struct Query {
    pub id: u64,
    #[serde(default, deserialize_with = "deserialize_null_string")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "query", default, deserialize_with = "deserialize_null_string")]
    pub query_text: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub data_source_id: Option<u64>,
    #[serde(default)]
    pub schedule: Option<Value>,
    #[serde(default)]
    pub latest_query_data_id: Option<u64>,
    #[serde(default)]
    pub user: Option<User>,
    /// As sent by the server
    #[serde(default)]
    pub created_at: Option<String>,
    /// As sent by the server
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Query {
    pub fn is_scheduled(&self) -> bool {
        self.schedule.as_ref().is_some_and(|s| !s.is_null())
    }

    /// `updated_at` parsed; `None` when absent or in an unknown format.
    pub fn updated_time(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }

    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

// Dashboard models
#[derive(Debug, Deserialize, Clone)]
pub struct Dashboard {
    pub id: u64,
    pub slug: String,
    #[serde(default, deserialize_with = "deserialize_null_string")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub widgets: Vec<Widget>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Dashboard tile: either backed by a visualization or free text.
#[derive(Debug, Deserialize, Clone)]
pub struct Widget {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_null_string")]
    pub text: String,
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub visualization: Option<Visualization>,
}

impl Widget {
    pub fn is_text_only(&self) -> bool {
        self.visualization.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct NewWidget {
    pub dashboard_id: u64,
    pub visualization_id: Option<u64>,
    pub text: String,
    pub options: Value,
    pub width: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Visualization {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

// Job models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Success,
    Failure,
    /// Any other code, kept as reported by the server.
    InProgress(i64),
}

impl JobStatus {
    pub const SUCCESS_CODE: i64 = 3;
    pub const FAILURE_CODE: i64 = 4;

    pub fn from_code(code: i64) -> Self {
        match code {
            Self::SUCCESS_CODE => JobStatus::Success,
            Self::FAILURE_CODE => JobStatus::Failure,
            other => JobStatus::InProgress(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            JobStatus::Success => Self::SUCCESS_CODE,
            JobStatus::Failure => Self::FAILURE_CODE,
            JobStatus::InProgress(code) => *code,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::InProgress(_))
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(JobStatus::from_code(i64::deserialize(deserializer)?))
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub query_result_id: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `{"job": {...}}` wrapper used by refresh and job endpoints.
#[derive(Debug, Deserialize)]
pub struct JobEnvelope {
    pub job: Job,
}

// Query result models
pub type Row = Map<String, Value>;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QueryResult {
    #[serde(default)]
    pub id: Option<u64>,
    pub data: QueryResultData,
    #[serde(default)]
    pub retrieved_at: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QueryResultData {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub friendly_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryResultEnvelope {
    pub query_result: QueryResult,
}

// Alert models
#[derive(Debug, Deserialize, Clone)]
pub struct Alert {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub rearm: Option<u64>,
    #[serde(default)]
    pub query: Option<Query>,
}

#[derive(Debug, Serialize)]
pub struct NewAlert {
    pub name: String,
    pub options: Value,
    pub query_id: u64,
}

/// Partial alert patch; only fields set to `Some` are sent.
#[derive(Debug, Serialize, Default, Clone)]
pub struct AlertUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rearm: Option<u64>,
}

// User models
#[derive(Debug, Deserialize, Clone)]
pub struct User {
    pub id: u64,
    #[serde(default, deserialize_with = "deserialize_null_string")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
}

// Data source models
#[derive(Debug, Deserialize, Clone)]
pub struct DataSource {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub syntax: Option<String>,
}
