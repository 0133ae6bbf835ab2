//! Print job assembly and transmission.
//!
//! A job is prepared in full, image decoding included, before the
//! printer connection is opened, so an invalid submission never leaves
//! the device with a half-completed receipt.

use chrono::NaiveDate;
use escpos_net::{NetworkPrinter, PrinterSink};
use image_pipeline::{RasterSegment, decode_and_orient, floyd_steinberg_dither, scale_to_width, segments};
use tracing::{debug, info, warn};

use crate::JobError;
use crate::config::PrinterConfig;
use crate::task::TaskTicket;
use crate::wrap::wrap_text;

/// Display format for due dates on the receipt.
const DUE_DATE_FORMAT: &str = "%m-%d-%Y";

/// Lines fed after the last segment, before the cut.
const END_OF_JOB_FEED: u8 = 1;

/// How far a submission progressed through transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Received,
    TextSent,
    ImageSent,
    Completed,
}

/// A fully prepared job: header text, ordered raster segments, cut flag.
///
/// Constructed per submission, consumed once, then discarded.
#[derive(Debug, Clone)]
pub struct PrintJob {
    pub header: String,
    pub segments: Vec<RasterSegment>,
    pub cut: bool,
}

/// Builds jobs from submissions and drives them through a printer sink.
#[derive(Debug, Clone)]
pub struct Composer {
    config: PrinterConfig,
}

impl Composer {
    pub fn new(config: PrinterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    /// Prepare a complete job from a task submission.
    ///
    /// The image payload, when present, is decoded, oriented, scaled,
    /// dithered, and segmented here; a bad image rejects the submission
    /// before any connection is opened.
    pub fn prepare(&self, task: &TaskTicket, image: Option<&[u8]>) -> Result<PrintJob, JobError> {
        let header = self.build_header(task);
        let segments = match image {
            Some(bytes) => self.prepare_segments(bytes)?,
            None => Vec::new(),
        };

        Ok(PrintJob {
            header,
            segments,
            cut: true,
        })
    }

    /// Prepare and print one task submission.
    pub async fn print_task(
        &self,
        task: &TaskTicket,
        image: Option<&[u8]>,
    ) -> Result<(), JobError> {
        let job = self.prepare(task, image)?;
        self.send(&job).await
    }

    /// Print a bare image with no text header.
    pub async fn print_image(&self, bytes: &[u8]) -> Result<(), JobError> {
        let job = PrintJob {
            header: String::new(),
            segments: self.prepare_segments(bytes)?,
            cut: true,
        };
        self.send(&job).await
    }

    /// Print raw text followed by a cut.
    pub async fn print_text(&self, text: &str) -> Result<(), JobError> {
        let job = PrintJob {
            header: text.to_string(),
            segments: Vec::new(),
            cut: true,
        };
        self.send(&job).await
    }

    /// Open a connection, send the job, and release the connection on
    /// every path. A send error takes precedence over a close error.
    pub async fn send(&self, job: &PrintJob) -> Result<(), JobError> {
        let mut printer = NetworkPrinter::connect(&self.config.address)
            .await
            .map_err(JobError::Connect)?;

        let send_result = send_job(&mut printer, job).await;
        let close_result = printer.close().await;

        match (send_result, close_result) {
            (Ok(state), Ok(())) => {
                info!(?state, segments = job.segments.len(), "Job completed");
                Ok(())
            }
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(JobError::Close(e)),
        }
    }

    fn prepare_segments(&self, bytes: &[u8]) -> Result<Vec<RasterSegment>, JobError> {
        let decoded = decode_and_orient(bytes)?;
        let scaled = scale_to_width(&decoded, self.config.width_px)?;
        let dithered = floyd_steinberg_dither(&scaled.to_luma8());
        Ok(segments(&dithered, self.config.max_raster_height)?.collect())
    }

    /// Format the wrapped text header for a task.
    ///
    /// Name and details wrap independently to the configured character
    /// width; the assignee line and the date line are short labels and
    /// print as-is.
    fn build_header(&self, task: &TaskTicket) -> String {
        let width = self.config.width_chars;

        let mut header = String::from("Task: ");
        header.push_str(&wrap_text(&task.name, width).join("\n"));
        header.push('\n');

        if let Some(assignee) = &task.assignee {
            header.push_str("\nAssignee: ");
            header.push_str(assignee);
            header.push('\n');
        }

        if let Some(details) = &task.details {
            header.push_str("\nDetails: ");
            header.push_str(&wrap_text(details, width).join("\n"));
            header.push('\n');
        }

        header.push_str("\nDue: ");
        header.push_str(&format_due_date(&task.due_date));
        header.push_str("\n\n");

        header
    }
}

/// Format a `YYYY-MM-DD` due date as `MM-DD-YYYY` for the receipt.
///
/// Anything unparseable is printed as supplied: a bad date is cosmetic
/// and must not fail the job.
pub fn format_due_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format(DUE_DATE_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Drive one prepared job through a sink: header, segments in index
/// order, end-of-job feed, best-effort cut.
///
/// Returns the final state on success; a transmission failure reports
/// the state the job had reached when it broke.
pub async fn send_job<S: PrinterSink>(sink: &mut S, job: &PrintJob) -> Result<JobState, JobError> {
    let mut state = JobState::Received;

    if !job.header.is_empty() {
        sink.send_text(&job.header)
            .await
            .map_err(|source| JobError::Transmission { state, source })?;
        state = JobState::TextSent;
        debug!("Header sent");
    }

    for segment in &job.segments {
        sink.send_raster(&segment.image)
            .await
            .map_err(|source| JobError::Transmission { state, source })?;
        state = JobState::ImageSent;
        debug!(
            index = segment.index,
            top = segment.top,
            height = segment.height(),
            "Segment sent"
        );
    }

    sink.feed(END_OF_JOB_FEED)
        .await
        .map_err(|source| JobError::Transmission { state, source })?;

    if job.cut {
        // Not every device has a cutter; a refusal does not fail the job.
        if let Err(e) = sink.cut().await {
            warn!(error = %e, "Cut failed, finishing job without it");
        }
    }

    Ok(JobState::Completed)
}
