//! TCP transport for ESC/POS network printers.

use std::time::Duration;

use image::GrayImage;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::sink::PrinterSink;
use crate::{PrinterError, Result, protocol};

/// Bound on how long a connection attempt may take.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// An open TCP connection to an ESC/POS printer.
///
/// Acquired fresh per job and released with [`close`](PrinterSink::close);
/// dropping the value also releases the socket.
pub struct NetworkPrinter {
    stream: Option<TcpStream>,
    address: String,
}

impl NetworkPrinter {
    /// Connect to a printer at `host:port` and initialize it.
    ///
    /// Fails fast: the attempt is bounded by a timeout rather than
    /// blocking on an unreachable device.
    pub async fn connect(address: &str) -> Result<Self> {
        info!(address, "Connecting to printer");

        let stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(address))
            .await
            .map_err(|_| PrinterError::ConnectionTimeout {
                address: address.to_string(),
                seconds: CONNECT_TIMEOUT.as_secs(),
            })?
            .map_err(|e| PrinterError::Connection {
                address: address.to_string(),
                message: e.to_string(),
            })?;

        let mut printer = Self {
            stream: Some(stream),
            address: address.to_string(),
        };
        printer.write(&protocol::initialize()).await?;

        debug!(address, "Printer initialized");
        Ok(printer)
    }

    async fn write(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(PrinterError::Closed)?;
        stream
            .write_all(data)
            .await
            .map_err(|e| PrinterError::Transmission(e.to_string()))
    }
}

impl PrinterSink for NetworkPrinter {
    async fn send_text(&mut self, text: &str) -> Result<()> {
        debug!(bytes = text.len(), "Sending text");
        self.write(text.as_bytes()).await
    }

    async fn send_raster(&mut self, image: &GrayImage) -> Result<()> {
        let frame = protocol::raster(image);
        debug!(
            width = image.width(),
            height = image.height(),
            frame_len = frame.len(),
            "Sending raster block"
        );
        self.write(&frame).await
    }

    async fn feed(&mut self, lines: u8) -> Result<()> {
        self.write(&protocol::feed(lines)).await
    }

    async fn cut(&mut self) -> Result<()> {
        self.write(&protocol::cut()).await
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            debug!(address = %self.address, "Closing printer connection");
            stream
                .shutdown()
                .await
                .map_err(|e| PrinterError::Transmission(e.to_string()))?;
        }
        Ok(())
    }
}
