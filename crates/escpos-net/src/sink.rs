//! The capability a print job is written through.

use image::GrayImage;

use crate::Result;

/// A device connection that accepts text, raster blocks, paper feed, and
/// a cut command.
///
/// One value represents one open connection; `close` releases it and the
/// sink must not be reused afterwards. Any call may fail; callers decide
/// per call whether a failure is fatal (`cut` conventionally is not:
/// some devices have no cutter).
#[allow(async_fn_in_trait)]
pub trait PrinterSink {
    /// Send raw text to be rendered by the device's line protocol.
    async fn send_text(&mut self, text: &str) -> Result<()>;

    /// Send one bitmap as a single raster block.
    ///
    /// The block must respect the device's per-command buffer limit;
    /// oversized bitmaps are a caller error the device will mangle.
    async fn send_raster(&mut self, image: &GrayImage) -> Result<()>;

    /// Print anything buffered and feed the given number of lines.
    async fn feed(&mut self, lines: u8) -> Result<()>;

    /// Cut the paper.
    async fn cut(&mut self) -> Result<()>;

    /// Release the connection.
    async fn close(&mut self) -> Result<()>;
}
