//! Observability and Metrics
//!
//! Process-wide counters for codec activity: PDUs in and out, octets moved,
//! and how often the decoder had to degrade instead of failing (skipped
//! records, reset IFF layers).
//!
//! Uses atomic counters for thread-safe metrics collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Global metrics collector for codec operations
#[derive(Debug)]
pub struct CodecMetrics {
    /// PDUs decoded successfully
    pub pdus_decoded: AtomicU64,
    /// PDUs encoded
    pub pdus_encoded: AtomicU64,
    /// PDUs rejected at the header or by an unrecoverable body error
    pub pdus_rejected: AtomicU64,
    /// PDUs of a type carried opaquely
    pub unsupported_pdus: AtomicU64,
    /// Total octets decoded
    pub bytes_decoded: AtomicU64,
    /// Total octets encoded
    pub bytes_encoded: AtomicU64,
    /// Nested records dropped during decode (unknown type or unreadable)
    pub records_skipped: AtomicU64,
    /// Optional IFF layers reset to absent during decode
    pub layers_reset: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl CodecMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            pdus_decoded: AtomicU64::new(0),
            pdus_encoded: AtomicU64::new(0),
            pdus_rejected: AtomicU64::new(0),
            unsupported_pdus: AtomicU64::new(0),
            bytes_decoded: AtomicU64::new(0),
            bytes_encoded: AtomicU64::new(0),
            records_skipped: AtomicU64::new(0),
            layers_reset: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a decoded PDU
    pub fn pdu_decoded(&self, byte_count: u64) {
        self.pdus_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record an encoded PDU
    pub fn pdu_encoded(&self, byte_count: u64) {
        self.pdus_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a rejected PDU
    pub fn pdu_rejected(&self) {
        self.pdus_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a PDU of an unsupported type
    pub fn unsupported_pdu(&self) {
        self.unsupported_pdus.fetch_add(1, Ordering::Relaxed);
    }

    /// Record dropped nested records
    pub fn records_skipped(&self, count: u64) {
        self.records_skipped.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a reset optional layer
    pub fn layer_reset(&self) {
        self.layers_reset.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pdus_decoded: self.pdus_decoded.load(Ordering::Relaxed),
            pdus_encoded: self.pdus_encoded.load(Ordering::Relaxed),
            pdus_rejected: self.pdus_rejected.load(Ordering::Relaxed),
            unsupported_pdus: self.unsupported_pdus.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            records_skipped: self.records_skipped.load(Ordering::Relaxed),
            layers_reset: self.layers_reset.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            pdus_decoded = snapshot.pdus_decoded,
            pdus_encoded = snapshot.pdus_encoded,
            pdus_rejected = snapshot.pdus_rejected,
            unsupported_pdus = snapshot.unsupported_pdus,
            bytes_decoded = snapshot.bytes_decoded,
            bytes_encoded = snapshot.bytes_encoded,
            records_skipped = snapshot.records_skipped,
            layers_reset = snapshot.layers_reset,
            uptime_seconds = snapshot.uptime_seconds,
            "Codec metrics snapshot"
        );
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub pdus_decoded: u64,
    pub pdus_encoded: u64,
    pub pdus_rejected: u64,
    pub unsupported_pdus: u64,
    pub bytes_decoded: u64,
    pub bytes_encoded: u64,
    pub records_skipped: u64,
    pub layers_reset: u64,
    pub uptime_seconds: u64,
}

/// Global metrics instance
static METRICS: once_cell::sync::Lazy<CodecMetrics> = once_cell::sync::Lazy::new(CodecMetrics::new);

/// Get the global metrics instance
pub fn global_metrics() -> &'static CodecMetrics {
    &METRICS
}
