//! Printer deployment configuration.
//!
//! Values are read once at startup and passed explicitly; nothing in the
//! core reads configuration globally.

use tracing::warn;

/// Default printable width in pixels.
const DEFAULT_WIDTH_PX: u32 = 512;

/// Default printable width in characters.
const DEFAULT_WIDTH_CHARS: usize = 42;

/// Default maximum rows one raster command may carry.
const DEFAULT_MAX_RASTER_HEIGHT: u32 = 72;

/// Default ESC/POS network port.
const DEFAULT_PORT: u16 = 9100;

/// Read-only deployment parameters for one printer.
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    /// Network address, `host:port`.
    pub address: String,
    /// Printable width in pixels; images are rescaled to exactly this.
    pub width_px: u32,
    /// Printable width in characters; the text header wraps to this.
    pub width_chars: usize,
    /// Maximum rows one raster command may carry.
    pub max_raster_height: u32,
}

impl PrinterConfig {
    /// Build a config for `address` with the default geometry.
    ///
    /// A bare hostname gets the standard ESC/POS port appended.
    pub fn new(address: impl Into<String>) -> Self {
        let mut address = address.into();
        if !address.contains(':') {
            address = format!("{address}:{DEFAULT_PORT}");
        }
        Self {
            address,
            width_px: DEFAULT_WIDTH_PX,
            width_chars: DEFAULT_WIDTH_CHARS,
            max_raster_height: DEFAULT_MAX_RASTER_HEIGHT,
        }
    }

    /// Build a config for `address`, overriding geometry from the
    /// environment.
    ///
    /// Reads `PRINTER_WIDTH_PX`, `PRINTER_WIDTH_CHARS`, and
    /// `PRINTER_MAX_RASTER_HEIGHT`; a malformed value keeps the default.
    pub fn from_env(address: impl Into<String>) -> Self {
        let mut config = Self::new(address);
        config.width_px = parse_var("PRINTER_WIDTH_PX", config.width_px);
        config.width_chars = parse_var("PRINTER_WIDTH_CHARS", config.width_chars);
        config.max_raster_height = parse_var("PRINTER_MAX_RASTER_HEIGHT", config.max_raster_height);
        config
    }
}

fn parse_var<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_value<T: std::str::FromStr + Copy>(key: &str, raw: &str, default: T) -> T {
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = raw, "Ignoring malformed configuration value");
            default
        }
    }
}
