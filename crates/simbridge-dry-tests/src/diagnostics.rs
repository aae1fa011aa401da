// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Diagnostics sink that keeps every report for later assertions.

use simbridge_types::{DiagnosticLevel, DiagnosticsPort};
use std::sync::{Arc, Mutex};

/// Records reports instead of logging them. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingDiagnostics {
    reports: Arc<Mutex<Vec<(DiagnosticLevel, String)>>>,
}

impl RecordingDiagnostics {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every report so far, in order.
    pub fn reports(&self) -> Vec<(DiagnosticLevel, String)> {
        self.reports
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of reports at `level`.
    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.reports().iter().filter(|(l, _)| *l == level).count()
    }

    /// Returns `true` if a report at `level` mentions `needle`.
    pub fn contains(&self, level: DiagnosticLevel, needle: &str) -> bool {
        self.reports()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl DiagnosticsPort for RecordingDiagnostics {
    fn report(&self, level: DiagnosticLevel, message: &str) {
        self.reports
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((level, message.to_owned()));
    }
}
