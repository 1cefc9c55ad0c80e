//! View-local copy of remotely fetched data

use crate::api::ApiError;
use chrono::{DateTime, Utc};

/// Last good value of a polled resource plus the outcome of the latest tick.
///
/// A successful tick replaces the value wholesale. A failed tick only
/// records the error, so stale data stays on screen.
#[derive(Debug, Clone)]
pub struct PolledResource<T> {
    data: Option<T>,
    loading: bool,
    last_error: Option<String>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl<T> Default for PolledResource<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            last_error: None,
            refreshed_at: None,
        }
    }
}

impl<T> PolledResource<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// True until the first tick settles
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Apply the result of one poll tick
    pub fn apply(&mut self, result: Result<T, ApiError>) {
        self.loading = false;
        match result {
            Ok(value) => {
                self.data = Some(value);
                self.last_error = None;
                self.refreshed_at = Some(Utc::now());
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Forget everything, back to the loading state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
