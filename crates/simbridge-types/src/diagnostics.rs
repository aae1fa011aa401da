// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Diagnostics port for resolver and mapping reports.
//!
//! The resolvers and the mapping engine never reach for a global logger for
//! the reports they declare; the caller injects a sink. [`TracingDiagnostics`]
//! is the default adapter and forwards everything to `tracing`.

/// Severity of a diagnostic report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// Informational trace (e.g. a text value falling through to `Text`).
    Trace,
    /// Something was skipped or treated as incompatible.
    Warn,
    /// An internal failure was absorbed.
    Error,
}

/// Sink for diagnostic reports.
pub trait DiagnosticsPort {
    /// Record one report.
    fn report(&self, level: DiagnosticLevel, message: &str);

    /// Record an informational trace.
    fn trace(&self, message: &str) {
        self.report(DiagnosticLevel::Trace, message);
    }

    /// Record a warning.
    fn warn(&self, message: &str) {
        self.report(DiagnosticLevel::Warn, message);
    }

    /// Record an absorbed error.
    fn error(&self, message: &str) {
        self.report(DiagnosticLevel::Error, message);
    }
}

impl<T: DiagnosticsPort + ?Sized> DiagnosticsPort for &T {
    fn report(&self, level: DiagnosticLevel, message: &str) {
        (**self).report(level, message);
    }
}

/// Forwards reports to the `tracing` macros under the `simbridge` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsPort for TracingDiagnostics {
    fn report(&self, level: DiagnosticLevel, message: &str) {
        match level {
            DiagnosticLevel::Trace => tracing::trace!(target: "simbridge", "{message}"),
            DiagnosticLevel::Warn => tracing::warn!(target: "simbridge", "{message}"),
            DiagnosticLevel::Error => tracing::error!(target: "simbridge", "{message}"),
        }
    }
}
