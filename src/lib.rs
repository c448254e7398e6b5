//! # qr-generator
//!
//! Turns a URL into a styled PNG QR code. One invocation, one image, one log
//! file; nothing is kept between runs.
//!
//! # Pipeline
//!
//! ```text
//! 1. Resolve    flags + env   →  GenerationRequest   (pure, fails fast)
//! 2. Place      directory     →  ResolvedOutputPath  (mkdir -p, name, .png)
//! 3. Render     payload       →  RgbImage            (QrEngine, fixed style)
//! 4. Persist    image         →  <dir>/<name>.png    (temp file + rename)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Layered `--flag` → environment → default resolution into a `GenerationRequest` |
//! | [`naming`] | Output directory creation and filename derivation |
//! | [`qr`] | The engine boundary: `QrEngine` trait, `RenderStyle`, `qrcode`-backed engine |
//! | [`generate`] | Runs a request end to end and returns a typed `GenerationResult` |
//! | [`telemetry`] | Per-process log file + stderr echo, scoped to a guard |
//! | [`output`] | The stdout/stderr result lines |
//!
//! # Design Decisions
//!
//! ## Fixed Render Style
//!
//! Every image uses [`qr::RenderStyle::STANDARD`]: low error correction,
//! 10px rounded modules, a 4-module quiet zone, black on white. The style is a
//! constant, not a flag, so two images of the same URL always look the same.
//!
//! ## Engine Behind a Trait
//!
//! Symbol encoding (version fit, Reed–Solomon, masking) is the `qrcode`
//! crate's job, and pixel drawing lives in [`qr::qrcode_engine`]. The
//! generator only sees [`qr::QrEngine`], which lets tests swap in a mock that
//! fails or panics on demand.
//!
//! ## Typed Results, Not Crashes
//!
//! [`generate::Generator::generate`] never panics and never leaks an engine
//! error type. The binary's only job is to turn a
//! [`generate::GenerationResult`] into a message and an exit code.
//!
//! ## Scoped Logging
//!
//! [`telemetry::init`] returns a guard that installs the subscriber for the
//! current thread and flushes the log file when dropped. There is no global
//! logger to configure from deep inside the library.

pub mod config;
pub mod generate;
pub mod naming;
pub mod output;
pub mod qr;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_helpers;
