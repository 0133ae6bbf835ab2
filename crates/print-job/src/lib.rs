//! Print job composition for task receipts.
//!
//! Takes one task submission, word-wraps the text header, prepares the
//! image raster segments, and drives a printer sink through the job:
//! header first, segments in order, end-of-job feed, best-effort cut.

pub mod compose;
pub mod config;
pub mod task;
pub mod wrap;

// Re-exports for convenience
pub use compose::{Composer, JobState, PrintJob, send_job};
pub use config::PrinterConfig;
pub use task::TaskTicket;

/// Errors that fail a print job.
///
/// Every failure path is observable here; a job is never silently left
/// incomplete. The composer performs no retries; resubmitting is the
/// caller's decision.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// The image payload could not be prepared. Nothing was sent.
    #[error("failed to prepare image: {0}")]
    Image(#[from] image_pipeline::PipelineError),

    /// The printer could not be reached. Nothing was sent.
    #[error("printer unreachable: {0}")]
    Connect(#[source] escpos_net::PrinterError),

    /// Transmission failed after the job had started.
    #[error("transmission failed (job reached {state:?}): {source}")]
    Transmission {
        state: compose::JobState,
        #[source]
        source: escpos_net::PrinterError,
    },

    /// The job was sent but the connection did not close cleanly.
    #[error("failed to release printer connection: {0}")]
    Close(#[source] escpos_net::PrinterError),
}
