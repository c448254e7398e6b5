//! Shared test utilities for the qr-generator test suite.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let (result, logs) = capture_logs(|| generator.generate(&request));
//! assert!(logs.contains(" - INFO - QR code generated successfully"));
//! assert_eq!(dir_entries(tmp.path()), vec!["site.png"]);
//! ```

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

use crate::telemetry::LineFormat;

// =========================================================================
// Log capture
// =========================================================================

/// In-memory sink usable as a `tracing_subscriber` writer.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a [`LineFormat`] subscriber writing into memory.
///
/// Returns `f`'s result and everything logged while it ran.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .event_format(LineFormat)
        .with_writer(buffer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

// =========================================================================
// Filesystem assertions
// =========================================================================

/// Sorted file names directly inside `dir`.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Decode a PNG and return its dimensions. Panics if it isn't a valid PNG.
pub fn png_dimensions(path: &Path) -> (u32, u32) {
    let img = image::ImageReader::open(path)
        .unwrap_or_else(|e| panic!("cannot open {}: {e}", path.display()))
        .with_guessed_format()
        .unwrap();
    assert_eq!(img.format(), Some(image::ImageFormat::Png));
    let decoded = img
        .decode()
        .unwrap_or_else(|e| panic!("{} is not a valid image: {e}", path.display()));
    (decoded.width(), decoded.height())
}
