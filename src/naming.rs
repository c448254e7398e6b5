//! Output path construction for generated images.
//!
//! Every image lands at `<directory>/<filename>.png`. The directory is created
//! on demand (intermediate segments included), and the filename is either the
//! caller's, normalized to end in `.png`, or a generated timestamp name:
//!
//! - `site` → `site.png`
//! - `site.png` → `site.png` (no double extension)
//! - `photo.PNG` → `photo.PNG.png` (the check is case-sensitive)
//! - *(none)* → `qr_code_20260115_093042.png`
//!
//! ## Same-second collisions
//!
//! Generated names have one-second resolution. Two runs without an explicit
//! filename inside the same second target the same file, and the second one
//! overwrites the first. This is accepted behavior: callers that need
//! distinct files in a tight loop pass `--output`.

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension every output image ends with.
pub const IMAGE_EXTENSION: &str = ".png";

/// Prefix of generated filenames.
pub const GENERATED_PREFIX: &str = "qr_code_";

/// `strftime` layout shared by generated image names and log file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Error, Debug)]
pub enum PathError {
    #[error("cannot create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("output path {} exists and is not a directory", path.display())]
    NotADirectory { path: PathBuf },
    #[error("output directory {} is not writable: {source}", path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A destination that is ready to be written: the directory exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputPath {
    pub directory: PathBuf,
    /// Always ends in [`IMAGE_EXTENSION`].
    pub filename: String,
    /// `directory` joined with `filename`, as given (not absolutized).
    pub full_path: PathBuf,
}

/// Timestamped filename stem, e.g. `qr_code_20260115_093042`.
pub fn generated_name(now: NaiveDateTime) -> String {
    format!("{GENERATED_PREFIX}{}", now.format(TIMESTAMP_FORMAT))
}

/// Append [`IMAGE_EXTENSION`] unless the name already ends with it.
pub fn normalize_extension(filename: &str) -> String {
    if filename.ends_with(IMAGE_EXTENSION) {
        filename.to_string()
    } else {
        format!("{filename}{IMAGE_EXTENSION}")
    }
}

/// Create `directory` if needed and pick the image filename, using the
/// current local time for generated names.
pub fn resolve_output_path(
    directory: &Path,
    filename: Option<&str>,
) -> Result<ResolvedOutputPath, PathError> {
    resolve_output_path_at(directory, filename, Local::now().naive_local())
}

/// [`resolve_output_path`] with an explicit clock.
///
/// An empty `filename` counts as absent.
pub fn resolve_output_path_at(
    directory: &Path,
    filename: Option<&str>,
    now: NaiveDateTime,
) -> Result<ResolvedOutputPath, PathError> {
    ensure_directory(directory)?;

    let filename = match filename.filter(|f| !f.is_empty()) {
        Some(name) => normalize_extension(name),
        None => normalize_extension(&generated_name(now)),
    };

    Ok(ResolvedOutputPath {
        directory: directory.to_path_buf(),
        full_path: directory.join(&filename),
        filename,
    })
}

/// Create `directory` and its parents; an existing directory is fine as long
/// as a file can be created in it.
fn ensure_directory(directory: &Path) -> Result<(), PathError> {
    fs::create_dir_all(directory).map_err(|source| {
        if directory.exists() && !directory.is_dir() {
            PathError::NotADirectory {
                path: directory.to_path_buf(),
            }
        } else {
            PathError::CreateDir {
                path: directory.to_path_buf(),
                source,
            }
        }
    })?;
    if !directory.is_dir() {
        return Err(PathError::NotADirectory {
            path: directory.to_path_buf(),
        });
    }
    // Anonymous file, gone as soon as it is dropped.
    tempfile::tempfile_in(directory).map_err(|source| PathError::NotWritable {
        path: directory.to_path_buf(),
        source,
    })?;
    Ok(())
}
