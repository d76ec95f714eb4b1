pub mod error_helpers;
pub mod file;
pub mod logging;
pub mod text;
pub mod validation;
