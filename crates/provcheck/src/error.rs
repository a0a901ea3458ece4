//! Error types for profile auditing operations.
//!
//! This module defines the [`enum@Error`] enum covering all failure cases
//! in the audit pipeline: filesystem access, archive reading, manifest
//! parsing, and external decoding.
//!
//! # See Also
//!
//! - [`crate::Result`] - Convenience type alias using this error

use thiserror::Error;

/// Error type for profile auditing operations.
///
/// Most failures during an audit are caught per file and converted to a
/// [`crate::Verdict`]; this type surfaces the underlying cause inside the
/// pipeline and the few environment failures that abort a run (such as an
/// unusable scratch directory).
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Occurs when reading input files, writing extracted or decoded
    /// artifacts, or managing the scratch directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive operation failed.
    ///
    /// The application archive is unreadable or not a valid container.
    /// See [`crate::archive`] module.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Property list parsing failed.
    ///
    /// The decoded manifest could not be parsed as a plist document.
    #[error("Plist error: {0}")]
    Plist(#[from] plist::Error),

    /// The external decode utility rejected the profile.
    ///
    /// Carries the captured standard-error text of the subprocess, or a
    /// description of the spawn failure if the utility could not be run.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// The decoded manifest has an unexpected shape.
    ///
    /// The document parsed but is not a dictionary, or the expiration
    /// field holds a non-date value.
    #[error("Invalid profile manifest: {0}")]
    Manifest(String),
}
