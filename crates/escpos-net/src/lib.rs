//! ESC/POS receipt printer transport over TCP.
//!
//! Provides the `PrinterSink` capability consumed by print jobs, the
//! byte-level ESC/POS command encoding, and a per-job network connection
//! to the physical device.

pub mod net;
pub mod protocol;
pub mod sink;

// Re-exports for convenience
pub use net::NetworkPrinter;
pub use sink::PrinterSink;

/// Errors that can occur while talking to a printer.
#[derive(Debug, thiserror::Error)]
pub enum PrinterError {
    #[error("failed to connect to printer at {address}: {message}")]
    Connection { address: String, message: String },

    #[error("connection to {address} timed out after {seconds} seconds")]
    ConnectionTimeout { address: String, seconds: u64 },

    #[error("transmission error: {0}")]
    Transmission(String),

    #[error("printer does not support paper cut")]
    CutUnsupported,

    #[error("connection already closed")]
    Closed,
}

/// Result type alias for printer operations.
pub type Result<T> = std::result::Result<T, PrinterError>;
