use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("JobError: {0}")]
    Job(#[from] JobError),
    #[error("PaginationError: {0}")]
    Pagination(#[from] PaginationError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Failures of a single HTTP round-trip.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("[{method}] /api/{path} ({status})")]
    Endpoint {
        method: String,
        path: String,
        status: u16,
        message: String,
    },
    #[error("[{method}] /api/{path} request failed: {message}")]
    Transport {
        method: String,
        path: String,
        message: String,
    },
    #[error("Request to /api/{path} timed out after {timeout_secs}s")]
    Timeout { path: String, timeout_secs: u64 },
    #[error("Failed to decode response from /api/{path}: {message}")]
    Decode { path: String, message: String },
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Endpoint { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization with the API key failed against {host} ({status})")]
    Rejected { host: String, status: u16 },
    #[error("Could not reach {host} to check credentials: {message}")]
    Unreachable { host: String, message: String },
    #[error("No API key provided")]
    MissingApiKey,
}

#[derive(Error, Debug)]
pub enum JobError {
    #[error("Refresh of query {query_id} failed ({status})")]
    SubmissionFailed { query_id: u64, status: u16 },
    #[error("Query execution failed (job {job_id}){}", reason_suffix(.error))]
    Failed {
        job_id: String,
        error: Option<String>,
    },
    #[error("Job {job_id} did not finish within {}s", .waited.as_secs())]
    DeadlineExceeded { job_id: String, waited: Duration },
    #[error("Failed getting results {result_id} of query {query_id} ({status})")]
    ResultFetch {
        query_id: u64,
        result_id: u64,
        status: u16,
    },
}

fn reason_suffix(error: &Option<String>) -> String {
    error
        .as_deref()
        .map(|e| format!(": {}", e))
        .unwrap_or_default()
}

#[derive(Error, Debug)]
pub enum PaginationError {
    #[error("page_size must be greater than 0")]
    ZeroPageSize,
    #[error("page {page} (size {page_size}) returned no results but count is {count}")]
    NoProgress { page: u32, page_size: u32, count: u64 },
    #[error("requested page {requested} but the server answered with page {returned}")]
    StalePage { requested: u32, returned: u32 },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, hint: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Terminal output error: {0}")]
    TerminalOutput(String),
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Endpoint { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::Endpoint {
                    status: 401 | 403, ..
                } => ErrorSeverity::High,
                ApiError::Transport { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Auth(_) => ErrorSeverity::Critical,
            AppError::Job(_) => ErrorSeverity::High,
            AppError::Pagination(_) => ErrorSeverity::High,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Auth(AuthError::Rejected { .. } | AuthError::MissingApiKey) => Some(
                "Check VENOMICS_API_KEY; it must be a user API key, not a query API key"
                    .to_string(),
            ),
            AppError::Auth(AuthError::Unreachable { .. }) | AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your network and the Venomics URL, then try again".to_string())
            }
            AppError::Config(ConfigError::MissingField { hint, .. }) => Some(hint.clone()),
            AppError::Api(ApiError::Endpoint { status: 404, .. }) => {
                Some("The resource does not exist or is not visible to this API key".to_string())
            }
            AppError::Job(JobError::DeadlineExceeded { .. }) => {
                Some("Increase --timeout or run without a deadline".to_string())
            }
            _ => None,
        }
    }
}
