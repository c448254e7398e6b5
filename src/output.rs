//! User-facing result lines.
//!
//! The binary speaks on two streams: one success line on stdout, one error
//! line on stderr. Logs go elsewhere (see [`telemetry`](crate::telemetry)), so
//! scripts can capture stdout without filtering.
//!
//! ```text
//! $ qr-generator --url https://example.com --dir out --output site
//! QR code generated successfully: out/site.png
//!
//! $ qr-generator
//! Error: URL is required either via --url argument or QR_URL environment variable
//! ```
//!
//! Each message has a `format_*` function (pure, testable) and a `print_*`
//! wrapper that writes it.

use std::fmt::Display;
use std::path::Path;

pub fn format_success(path: &Path) -> String {
    format!("QR code generated successfully: {}", path.display())
}

pub fn format_failure(err: &dyn Display) -> String {
    format!("Error: {err}")
}

pub fn print_success(path: &Path) {
    println!("{}", format_success(path));
}

pub fn print_failure(err: &dyn Display) {
    eprintln!("{}", format_failure(err));
}
