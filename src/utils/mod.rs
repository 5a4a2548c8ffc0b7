//! # Utility Modules
//!
//! Supporting utilities for observability and value checks.
//!
//! ## Components
//! - **Logging**: Structured logging configuration
//! - **Metrics**: Thread-safe codec counters
//! - **Validation**: Numeric validity checks used by `is_valid()`

pub mod logging;
pub mod metrics;
pub mod validation;

pub use metrics::{global_metrics, CodecMetrics, MetricsSnapshot};
