//! API layer: transport, resource methods and typed records.

/// Resource client root type and construction protocol
pub mod client;
/// Typed remote records
pub mod models;
/// Authenticated HTTP primitives
pub mod transport;

mod alerts;
mod dashboards;
mod data_sources;
mod queries;
mod users;

pub use dashboards::copy_of_widget;
pub use queries::filter_scheduled;
