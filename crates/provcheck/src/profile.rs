//! Expiry checking for a single provisioning profile.
//!
//! Decodes the signed profile to a sibling `.plist` manifest, reads its
//! `ExpirationDate`, and compares against the run's single "now" instant.
//! The decoded manifest is deleted on every exit path.

use crate::decode::ProfileDecoder;
use crate::report::Verdict;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Manifest key holding the profile's expiration instant.
pub const EXPIRATION_KEY: &str = "ExpirationDate";

/// Suffix appended to the profile path for the decoded manifest.
const DECODED_SUFFIX: &str = ".plist";

/// Check whether the profile at `path` is expired relative to `now`.
///
/// All failure modes are folded into the returned [`Verdict`]; this function
/// never fails the overall run. `now` is injected rather than sampled so
/// every profile in a run is judged against the same instant.
pub fn check_expiry(path: &Path, decoder: &dyn ProfileDecoder, now: DateTime<Utc>) -> Verdict {
    let decoded = decoded_path(path);
    let verdict = run_check(path, &decoded, decoder, now);

    // Scoped cleanup: the decoded manifest never outlives the check.
    if decoded.exists() {
        let _ = fs::remove_file(&decoded);
    }

    verdict
}

/// Sibling output path for the decoded manifest (`<path>.plist`).
fn decoded_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(DECODED_SUFFIX);
    PathBuf::from(os)
}

fn run_check(
    path: &Path,
    decoded: &Path,
    decoder: &dyn ProfileDecoder,
    now: DateTime<Utc>,
) -> Verdict {
    if let Err(e) = decoder.decode(path, decoded) {
        let detail = match e {
            Error::Decode(detail) => detail,
            other => other.to_string(),
        };
        return Verdict::FailedDecode { detail };
    }

    match read_expiration(decoded) {
        Ok(Some(expires)) => {
            if expires < now {
                Verdict::Expired { expires }
            } else {
                Verdict::Valid { expires }
            }
        }
        Ok(None) => Verdict::NoExpiration,
        Err(e) => Verdict::ProcessError {
            detail: e.to_string(),
        },
    }
}

/// Read the expiration instant from a decoded manifest.
///
/// Returns `Ok(None)` when the manifest has no [`EXPIRATION_KEY`] entry.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, is not a
/// dictionary, or the expiration field is not a date.
fn read_expiration(decoded: &Path) -> Result<Option<DateTime<Utc>>> {
    let manifest = plist::Value::from_file(decoded)?;

    let dict = manifest
        .as_dictionary()
        .ok_or_else(|| Error::Manifest("decoded profile is not a dictionary".into()))?;

    match dict.get(EXPIRATION_KEY) {
        None => Ok(None),
        Some(value) => {
            let date = value.as_date().ok_or_else(|| {
                Error::Manifest(format!("{} is not a date", EXPIRATION_KEY))
            })?;
            Ok(Some(DateTime::<Utc>::from(SystemTime::from(date))))
        }
    }
}
