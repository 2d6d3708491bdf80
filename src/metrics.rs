//! Metric helpers for `replayframe`.
//!
//! This module defines metric names and simple helper functions
//! wrapping the [`metrics`](https://docs.rs/metrics) crate. Exporter
//! installation is left to the consuming application.

use metrics::counter;

/// Name of the counter tracking decoded frames.
pub const FRAMES_DECODED: &str = "replayframe_frames_decoded_total";
/// Name of the counter tracking framing errors.
pub const FRAME_ERRORS: &str = "replayframe_frame_errors_total";

/// Record a successfully decoded frame.
pub fn inc_frames() { counter!(FRAMES_DECODED).increment(1); }

/// Record a framing error.
pub fn inc_frame_errors() { counter!(FRAME_ERRORS).increment(1); }
