//! Audit orchestration.
//!
//! Ties the walker, extractor, and expiry checker together: one
//! [`Auditor::run`] walks the root, checks every profile it finds, streams a
//! verdict line per file, and guarantees the scratch directory is gone by
//! the time it returns.

use crate::decode::{ProfileDecoder, SecurityCms};
use crate::report::{Report, Verdict};
use crate::scan::{self, Candidate};
use crate::{archive, profile, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default scratch directory for profiles extracted from archives.
pub const DEFAULT_SCRATCH_DIR: &str = "temp_extracted";

/// Provisioning-profile audit workflow.
///
/// Builder-style configuration with defaults matching the tool's standard
/// behavior: scan the current directory, extract into `temp_extracted`,
/// decode with the `security` utility, and judge expiry against a single
/// instant sampled when the auditor is created.
///
/// # Examples
///
/// ```no_run
/// use provcheck::Auditor;
///
/// let reports = Auditor::new().root("Artifacts").run(&mut std::io::stdout())?;
/// # Ok::<(), provcheck::Error>(())
/// ```
pub struct Auditor {
    root: PathBuf,
    scratch_dir: PathBuf,
    now: DateTime<Utc>,
    decoder: Box<dyn ProfileDecoder>,
}

impl Auditor {
    /// Auditor with default configuration.
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("."),
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
            now: Utc::now(),
            decoder: Box::new(SecurityCms::new()),
        }
    }

    /// Set the root directory to scan.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the scratch directory used for extracted profiles.
    ///
    /// The directory is created at the start of a run (deleting any
    /// leftover from a previous run) and removed at the end.
    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Override the instant profiles are judged against.
    ///
    /// Every profile in a run is compared to this one instant; it is never
    /// re-sampled per file.
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Substitute the profile decoder.
    pub fn decoder(mut self, decoder: impl ProfileDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    /// Run the audit, streaming one line per report to `out`.
    ///
    /// Per-file failures (undecodable profiles, corrupt archives, malformed
    /// manifests) are converted to reports and never abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error only for environment failures: the scratch
    /// directory cannot be created, or `out` cannot be written.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<Vec<Report>> {
        let scratch = ScratchDir::create(&self.scratch_dir)?;

        let mut reports = Vec::new();

        for candidate in scan::candidates(&self.root) {
            match candidate {
                Candidate::Profile(path) => {
                    self.check_one(path, out, &mut reports)?;
                }
                Candidate::Archive(path) => {
                    self.check_archive(path, scratch.path(), out, &mut reports)?;
                }
            }
        }

        Ok(reports)
    }

    /// Extract an archive's embedded profiles and check each one.
    fn check_archive<W: Write>(
        &self,
        path: PathBuf,
        scratch: &Path,
        out: &mut W,
        reports: &mut Vec<Report>,
    ) -> Result<()> {
        let extracted = match archive::extract_embedded_profiles(&path, scratch) {
            Ok(extracted) => extracted,
            Err(e) => {
                // Unreadable archive: report it and carry on with zero profiles.
                return self.emit(
                    Report {
                        path,
                        verdict: Verdict::ExtractError {
                            detail: e.to_string(),
                        },
                    },
                    out,
                    reports,
                );
            }
        };

        if extracted.is_empty() {
            return self.emit(
                Report {
                    path,
                    verdict: Verdict::NoEmbeddedProfiles,
                },
                out,
                reports,
            );
        }

        for extracted_path in extracted {
            self.check_one(extracted_path.clone(), out, reports)?;
            let _ = fs::remove_file(&extracted_path);
        }

        Ok(())
    }

    /// Check a single profile and emit its report.
    fn check_one<W: Write>(
        &self,
        path: PathBuf,
        out: &mut W,
        reports: &mut Vec<Report>,
    ) -> Result<()> {
        let verdict = profile::check_expiry(&path, self.decoder.as_ref(), self.now);

        if let Verdict::FailedDecode { detail } = &verdict {
            writeln!(out, "Error decoding {}: {}", path.display(), detail)?;
        }

        self.emit(Report { path, verdict }, out, reports)
    }

    fn emit<W: Write>(
        &self,
        report: Report,
        out: &mut W,
        reports: &mut Vec<Report>,
    ) -> Result<()> {
        writeln!(out, "{}", report)?;
        reports.push(report);
        Ok(())
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Scratch directory with scoped lifetime.
///
/// Created empty (defensively deleting any leftover), removed again when
/// dropped, so the directory never survives a run on any exit path.
struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            fs::remove_dir_all(path)?;
        }
        fs::create_dir_all(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
