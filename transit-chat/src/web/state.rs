//! Application state for the web layer.

use std::sync::Arc;

use crate::assistant::Assistant;
use crate::transport::HttpTransport;

/// Shared application state.
///
/// Directories inside the assistant are built before the server starts
/// and never mutated, so no locking is needed.
pub struct AppState<T = HttpTransport> {
    pub assistant: Arc<Assistant<T>>,
}

impl<T> AppState<T> {
    pub fn new(assistant: Assistant<T>) -> Self {
        Self {
            assistant: Arc::new(assistant),
        }
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            assistant: Arc::clone(&self.assistant),
        }
    }
}
