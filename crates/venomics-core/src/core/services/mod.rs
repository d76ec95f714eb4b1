pub mod config_service;
pub mod export_service;
pub mod scan_service;
pub mod traits;
