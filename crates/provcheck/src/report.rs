//! Audit verdicts and their console rendering.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

/// Timestamp layout used in verdict lines, e.g. `2020-01-01 00:00:00`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of auditing a single file.
///
/// The first five variants are per-profile verdicts; the last two describe
/// archive-level outcomes (an `.ipa` with nothing to check, or one that
/// could not be read).
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Expiration instant is strictly earlier than the run's "now".
    Expired { expires: DateTime<Utc> },
    /// Expiration instant is at or after the run's "now".
    Valid { expires: DateTime<Utc> },
    /// The external utility rejected the profile; `detail` is its stderr.
    FailedDecode { detail: String },
    /// The decoded manifest lacks an `ExpirationDate` field.
    NoExpiration,
    /// The decoded manifest could not be read or interpreted.
    ProcessError { detail: String },
    /// The archive contained no embedded profile. Not an error.
    NoEmbeddedProfiles,
    /// The archive was unreadable or not a valid container.
    ExtractError { detail: String },
}

impl Verdict {
    /// Machine-readable status label for this verdict.
    pub fn status(&self) -> &'static str {
        match self {
            Verdict::Expired { .. } => "EXPIRED",
            Verdict::Valid { .. } => "VALID",
            Verdict::FailedDecode { .. } => "FAILED_DECODE",
            Verdict::NoExpiration => "NO_EXPIRATION",
            Verdict::ProcessError { .. } | Verdict::ExtractError { .. } => "ERROR",
            Verdict::NoEmbeddedProfiles => "NO_EMBEDDED",
        }
    }

    /// Expiration instant, when the profile decoded and carried one.
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        match self {
            Verdict::Expired { expires } | Verdict::Valid { expires } => Some(*expires),
            _ => None,
        }
    }
}

/// One audited file and its verdict.
///
/// `Display` renders exactly one console line in the tool's output format.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Path as encountered during the walk (or the extracted scratch path
    /// for profiles pulled out of an archive).
    pub path: PathBuf,
    pub verdict: Verdict,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.verdict {
            Verdict::Expired { expires } => write!(
                f,
                "{}: EXPIRED (Expires: {})",
                path,
                expires.format(TIMESTAMP_FORMAT)
            ),
            Verdict::Valid { expires } => write!(
                f,
                "{}: VALID (Expires: {})",
                path,
                expires.format(TIMESTAMP_FORMAT)
            ),
            Verdict::FailedDecode { .. } => write!(f, "{}: Failed to decode", path),
            Verdict::NoExpiration => write!(f, "{}: No expiration date found", path),
            Verdict::ProcessError { detail } => {
                write!(f, "{}: Error processing - {}", path, detail)
            }
            Verdict::NoEmbeddedProfiles => {
                write!(f, "{}: No embedded.mobileprovision found", path)
            }
            Verdict::ExtractError { detail } => {
                write!(f, "{}: Error extracting - {}", path, detail)
            }
        }
    }
}
