pub mod jobs;
pub mod pagination;
pub mod services;
