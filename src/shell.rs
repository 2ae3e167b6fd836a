//! Top-level navigation state and the refresh counter shared by all sections.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Registration,
    Visualization,
}

impl Section {
    pub const fn title(self) -> &'static str {
        match self {
            Section::Registration => "Registration Area",
            Section::Visualization => "Data Visualization",
        }
    }
}

/// Application shell.
///
/// A successful registration bumps the refresh counter; the visualization view
/// remounts whenever it observes a value it has not loaded yet.
#[derive(Debug, Default)]
pub struct Shell {
    refresh_key: AtomicU64,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after a record was created.
    pub fn notify_success(&self) -> u64 {
        self.refresh_key.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn refresh_key(&self) -> u64 {
        self.refresh_key.load(Ordering::Acquire)
    }
}
