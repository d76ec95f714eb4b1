//! Progress display for long-running operations
//!
//! Everything here writes to stderr so that stdout stays clean for data.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const SPINNER_UPDATE_INTERVAL_MS: u64 = 100;
const CLEAR_LINE_WIDTH: usize = 100;

/// Spinner drawn from a background thread while a request is in flight.
pub struct ProgressSpinner {
    message: String,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ProgressSpinner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Start drawing; does nothing when stderr is not a terminal.
    pub fn start(&mut self) {
        if !atty::is(atty::Stream::Stderr) || self.handle.is_some() {
            return;
        }
        self.running.store(true, Ordering::Relaxed);
        let running = Arc::clone(&self.running);
        let message = self.message.clone();

        let handle = thread::spawn(move || {
            let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut index = 0;

            while running.load(Ordering::Relaxed) {
                eprint!("\r{} {}", spinner_chars[index], message);
                let _ = io::stderr().flush();

                index = (index + 1) % spinner_chars.len();
                thread::sleep(Duration::from_millis(SPINNER_UPDATE_INTERVAL_MS));
            }

            eprint!("\r{:<width$}\r", "", width = CLEAR_LINE_WIDTH);
            let _ = io::stderr().flush();
        });

        self.handle = Some(handle);
    }

    pub fn stop(&mut self, completion_message: Option<&str>) {
        self.running.store(false, Ordering::Relaxed);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        if let Some(msg) = completion_message {
            eprintln!(" {}", msg);
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for ProgressSpinner {
    fn drop(&mut self) {
        self.stop(None);
    }
}

/// `[████░░░░] 50.0% (1/2)` for a fixed-width bar.
pub fn render_progress_bar(current: usize, total: usize, width: usize) -> String {
    if total == 0 {
        return String::new();
    }

    let progress = current.min(total) as f32 / total as f32;
    let filled = (progress * width as f32) as usize;
    let empty = width.saturating_sub(filled);

    format!(
        "[{}{}] {:.1}% ({}/{})",
        "█".repeat(filled),
        "░".repeat(empty),
        progress * 100.0,
        current,
        total
    )
}

/// Redraw the bar in place; ends the line once `current == total`.
/// Silent when stderr is not a terminal.
pub fn show_progress_bar(label: &str, current: usize, total: usize, width: usize) {
    if total == 0 || !atty::is(atty::Stream::Stderr) {
        return;
    }

    eprint!("\r{} {}", label, render_progress_bar(current, total, width));
    let _ = io::stderr().flush();

    if current == total {
        eprintln!();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    InProgress,
    Success,
    Warning,
    Error,
}

pub fn display_status(operation: &str, status: OperationStatus) {
    let (symbol, message) = match status {
        OperationStatus::InProgress => ("⏳", format!("In progress: {}", operation)),
        OperationStatus::Success => ("✅", format!("Completed: {}", operation)),
        OperationStatus::Warning => ("⚠️", format!("Warning: {}", operation)),
        OperationStatus::Error => ("❌", format!("Error: {}", operation)),
    };

    eprintln!(" {} {}", symbol, message);
}
