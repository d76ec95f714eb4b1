//! # venomics-core
//!
//! Client library for the Venomics BI REST API.
//!
//! This crate provides the authenticated transport, typed resource methods,
//! pagination and job polling helpers, and the automations built on top of
//! them (sensitive-data scan, bulk query export, one-off refresh).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use venomics_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> venomics_core::Result<()> {
//!     let config = ClientConfig::new("https://bi.example.com", "api-key");
//!     let client = VenomicsClient::connect(config).await?;
//!
//!     for query in client.scheduled_queries().await? {
//!         println!("{} {}", query.id, query.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           API Layer                 │  Transport, resource methods, records
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Pagination, jobs, automations
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  Configuration file, API key lookup
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Validation, logging, text helpers
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use venomics_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::AppError;

    pub use crate::api::client::VenomicsClient;
    pub use crate::api::models::{
        Alert, AlertUpdate, Dashboard, DataSource, Job, JobStatus, NewWidget, Page, Query, Row,
        User, Widget,
    };
    pub use crate::api::transport::ClientConfig;

    pub use crate::core::jobs::{PollOptions, fresh_query_result};
    pub use crate::core::pagination::{PageRequest, paginate};
    pub use crate::core::services::config_service::ConfigService;
    pub use crate::core::services::export_service::QueryExporter;
    pub use crate::core::services::scan_service::{ScanReport, SensitiveDataScanner};
    pub use crate::core::services::traits::ScanSource;

    pub use crate::storage::config::Config;

    pub use crate::display::TableDisplay;
}

/// Pagination, job polling and the automation services.
pub mod core;

/// Configuration file and API key lookup.
pub mod storage;

/// Validation, logging, text and file helpers.
pub mod utils;

/// HTTP transport, resource client and typed records.
pub mod api;

/// Terminal tables and progress output.
pub mod display;

/// Hierarchical error system with severity and troubleshooting hints.
pub mod error;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
