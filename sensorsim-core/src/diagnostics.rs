//! Structured Diagnostics Channel
//!
//! ## Overview
//!
//! The pipeline never fails a `sample()` call because an optional capability
//! is missing. It skips the affected stage and records a [`Diagnostic`]
//! instead. Ground-truth failures are recorded the same way, alongside the
//! error reading the caller receives.
//!
//! ```text
//! stage ──emit──▶ DiagnosticSink ──▶ host drains / routes to telemetry
//!                      │
//!                      └──▶ `log` facade (feature "log")
//! ```
//!
//! ## Memory Model
//!
//! [`DiagnosticLog`] keeps the most recent entries in a fixed-capacity
//! `heapless::Deque`. When full, the oldest entry is dropped and counted, so
//! a long simulation that never drains its sensors does not grow memory.
//!
//! ## Example
//!
//! ```rust
//! use sensorsim_core::diagnostics::{Diagnostic, DiagnosticLog, DiagnosticSink, Severity};
//! use sensorsim_core::stages::StageKind;
//!
//! let mut log = DiagnosticLog::new();
//! log.emit(Diagnostic::warning("emf-1", StageKind::Drift, "no simulation clock"));
//!
//! assert_eq!(log.count(Severity::Warning), 1);
//! let drained = log.drain();
//! assert_eq!(drained[0].stage, StageKind::Drift);
//! assert!(log.is_empty());
//! ```

use core::fmt;

use heapless::Deque;

use crate::constants::buffers::DIAGNOSTIC_CAPACITY;
use crate::stages::StageKind;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational, nothing was skipped
    Info,
    /// A stage was skipped or a sample failed
    Warning,
}

/// One recoverable event reported by a sensor
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// How serious the event is
    pub severity: Severity,
    /// Sensor that reported it
    pub sensor_id: String,
    /// Pipeline stage that reported it
    pub stage: StageKind,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    /// Warning-level diagnostic
    pub fn warning(sensor_id: impl Into<String>, stage: StageKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            sensor_id: sensor_id.into(),
            stage,
            message: message.into(),
        }
    }

    /// Info-level diagnostic
    pub fn info(sensor_id: impl Into<String>, stage: StageKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            sensor_id: sensor_id.into(),
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.sensor_id, self.stage.name(), self.message)
    }
}

/// Destination for diagnostics
pub trait DiagnosticSink {
    /// Record one diagnostic
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Bounded in-memory diagnostic log, drop-oldest when full
#[derive(Debug, Clone)]
pub struct DiagnosticLog {
    entries: Deque<Diagnostic, DIAGNOSTIC_CAPACITY>,
    dropped: u64,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticLog {
    /// Empty log
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
            dropped: 0,
        }
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is retained
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dropped because the log was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Iterate retained entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Retained entries of a given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|d| d.severity == severity).count()
    }

    /// Retained entries reported by a stage
    pub fn count_stage(&self, stage: StageKind) -> usize {
        self.entries.iter().filter(|d| d.stage == stage).count()
    }

    /// Remove and return every retained entry, oldest first
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        let mut out = Vec::with_capacity(self.entries.len());
        while let Some(d) = self.entries.pop_front() {
            out.push(d);
        }
        out
    }

    /// Forget every retained entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => {
                log_warn!("{}", diagnostic);
            }
            Severity::Info => {
                log_debug!("{}", diagnostic);
            }
        }

        if self.entries.is_full() {
            self.entries.pop_front();
            self.dropped += 1;
        }
        // Cannot fail: a slot was freed above when full
        let _ = self.entries.push_back(diagnostic);
    }
}
