pub mod progress;
pub mod table;

pub use progress::{OperationStatus, ProgressSpinner, display_status, show_progress_bar};
pub use table::TableDisplay;
