//! Screen navigation seam

use std::sync::Mutex;

/// Moves the host between screens
pub trait Navigator: Send + Sync {
    /// Go back one entry in the history
    fn previous_state(&self);

    fn navigate(&self, path: &str);
}

/// Navigator keeping a history stack of paths
///
/// `previous_state` on a single-entry history stays where it is.
#[derive(Debug)]
pub struct HistoryNavigator {
    stack: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            stack: Mutex::new(vec![start.into()]),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.stack.lock().ok().and_then(|s| s.last().cloned())
    }

    pub fn depth(&self) -> usize {
        self.stack.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn previous_state(&self) {
        if let Ok(mut stack) = self.stack.lock() {
            if stack.len() > 1 {
                stack.pop();
            }
            tracing::debug!(path = ?stack.last(), "navigated back");
        }
    }

    fn navigate(&self, path: &str) {
        if let Ok(mut stack) = self.stack.lock() {
            stack.push(path.to_string());
            tracing::debug!(path, "navigated");
        }
    }
}
