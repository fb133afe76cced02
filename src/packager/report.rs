//! Progress narration for the user running the build.

use std::sync::Mutex;

/// Receives a line of progress before each major packaging step.
///
/// Narration is what the user sees in the build output; when a step fails,
/// the last line reported tells which unit and step it was.
pub trait Reporter: Send + Sync {
    /// Reports one progress line.
    fn log(&self, message: &str);
}

/// Reporter that keeps every line in memory, for inspection after a run.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<String>>,
}

impl MemoryReporter {
    /// Creates an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines reported so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl Reporter for MemoryReporter {
    fn log(&self, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(message.to_string());
        }
    }
}
