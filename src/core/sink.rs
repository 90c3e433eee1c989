//! Destinations that observe report items as they are produced.

use std::sync::{Arc, Mutex};

use crate::issues::{ReportItem, Severity};

pub trait ReportSink: Send + Sync {
    fn report(&self, item: &ReportItem);
}

impl<S: ReportSink + ?Sized> ReportSink for Arc<S> {
    fn report(&self, item: &ReportItem) {
        (**self).report(item)
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn report(&self, _item: &ReportItem) {}
}

/// Emits one `tracing` event per item at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&self, item: &ReportItem) {
        let severity = match item.severity() {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
        };
        tracing::debug!(
            severity,
            kind = %item.kind(),
            file = item.file_name(),
            key = item.key(),
            "{}",
            item.description()
        );
    }
}

/// Keeps every item in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    items: Mutex<Vec<ReportItem>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<ReportItem> {
        self.items
            .lock()
            .map(|items| items.clone())
            .unwrap_or_default()
    }
}

impl ReportSink for CollectingSink {
    fn report(&self, item: &ReportItem) {
        if let Ok(mut items) = self.items.lock() {
            items.push(item.clone());
        }
    }
}
