//! Scoped query capture.
//!
//! A `CaptureSession` is an owned handle opened before a request runs and
//! drained after it. Records leave the session by value through
//! [`CaptureSession::finish`]; there is no process-wide collector.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use querycraft_core::constants::MAX_CAPTURED_FRAMES;
use querycraft_core::errors::CaptureError;
use querycraft_core::types::{Binding, QueryRecord, StackFrame};

/// Records drained from a finished session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapturedQueries {
    pub records: Vec<QueryRecord>,
    pub total_time_ms: f64,
}

#[derive(Debug)]
pub struct CaptureSession {
    started: Instant,
    records: Vec<QueryRecord>,
    total_time_ms: f64,
    closed: bool,
}

impl CaptureSession {
    pub fn start() -> Self {
        tracing::debug!("capture session started");
        Self {
            started: Instant::now(),
            records: Vec::new(),
            total_time_ms: 0.0,
            closed: false,
        }
    }

    /// Append one executed statement.
    ///
    /// Frames without a file are dropped and the stack is cut to
    /// `MAX_CAPTURED_FRAMES`.
    pub fn record(
        &mut self,
        sql: impl Into<String>,
        bindings: Vec<Binding>,
        duration_ms: f64,
        call_stack: Vec<StackFrame>,
    ) -> Result<(), CaptureError> {
        let sql = sql.into();
        if self.closed {
            return Err(CaptureError::SessionClosed { dropped_sql: sql });
        }

        let call_stack: Vec<StackFrame> = call_stack
            .into_iter()
            .filter(|frame| frame.file.as_deref().is_some_and(|f| !f.is_empty()))
            .take(MAX_CAPTURED_FRAMES)
            .collect();

        self.total_time_ms += duration_ms;
        self.records.push(
            QueryRecord::new(sql, duration_ms)
                .with_bindings(bindings)
                .with_call_stack(call_stack)
                .with_captured_at(self.started.elapsed()),
        );
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn total_time_ms(&self) -> f64 {
        self.total_time_ms
    }

    pub fn is_active(&self) -> bool {
        !self.closed
    }

    /// Drop everything recorded so far. The session stays open.
    pub fn clear(&mut self) {
        self.records.clear();
        self.total_time_ms = 0.0;
    }

    /// Stop accepting records. Already captured records are kept.
    pub fn stop(&mut self) {
        if !self.closed {
            self.closed = true;
            tracing::debug!(query_count = self.records.len(), "capture session stopped");
        }
    }

    /// Hand the captured records over, consuming the session.
    pub fn finish(self) -> CapturedQueries {
        CapturedQueries {
            records: self.records,
            total_time_ms: self.total_time_ms,
        }
    }
}
