//! Ingestion outcome reporting.

use std::fmt;

use crate::error::IngestionError;

use super::unified::IngestionFormat;

/// How bad a failed ingestion was. Ordered, so it doubles as an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// The content could not be parsed or had the wrong shape.
    Error,
    /// The file could not be read at all.
    Critical,
}

/// Identifies the input an event is about.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// Path, or a caller-supplied label for in-memory content.
    pub source: String,
    pub format: IngestionFormat,
}

/// Reported with every successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Records produced.
    pub rows: usize,
}

/// Hook for ingestion outcomes. Every method defaults to a no-op except
/// [`IngestionObserver::on_alert`], which falls back to `on_failure`.
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestionError) {}

    /// Invoked after `on_failure` when the severity reaches
    /// [`super::IngestionOptions::alert_at_or_above`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Logs ingestion events through `tracing`.
#[derive(Default)]
pub struct TracingObserver;

impl fmt::Debug for TracingObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TracingObserver")
    }
}

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::info!(
            format = ?ctx.format,
            source = %ctx.source,
            rows = stats.rows,
            "ingested roster"
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        tracing::warn!(
            ?severity,
            format = ?ctx.format,
            source = %ctx.source,
            %error,
            "ingestion failed"
        );
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        tracing::error!(
            ?severity,
            format = ?ctx.format,
            source = %ctx.source,
            %error,
            "ingestion alert"
        );
    }
}
