//! Embedded profile extraction from application archives.
//!
//! IPA files are ZIP archives; a signed app carries its provisioning profile
//! as `embedded.mobileprovision` inside the `.app` bundle. This module scans
//! an archive's member list for that filename and pulls every match into the
//! scratch directory.

use crate::Result;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Conventional filename of a profile bundled inside an app archive.
pub const EMBEDDED_PROFILE_NAME: &str = "embedded.mobileprovision";

/// Extract every embedded provisioning profile from an IPA archive.
///
/// Member names are matched by suffix against
/// [`EMBEDDED_PROFILE_NAME`], regardless of the containing directory, so
/// profiles in nested bundles (app extensions, watch apps) are found too.
/// Each match is written to `scratch_dir` under `<basename>_<index>` so
/// multiple profiles from one archive never overwrite each other.
///
/// Returns the extracted paths in member order; an archive with no embedded
/// profile yields an empty vector, which is not an error.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened, is not a valid ZIP
/// container, or a member cannot be written to the scratch directory.
pub fn extract_embedded_profiles(
    ipa_path: impl AsRef<Path>,
    scratch_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let file = File::open(ipa_path.as_ref())?;
    let mut archive = ZipArchive::new(file)?;

    let mut extracted = Vec::new();

    for i in 0..archive.len() {
        let mut member = archive.by_index(i)?;

        if !member.name().ends_with(EMBEDDED_PROFILE_NAME) {
            continue;
        }

        let basename = Path::new(member.name())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| EMBEDDED_PROFILE_NAME.to_string());

        // Index suffix disambiguates multiple profiles from the same archive.
        let dest = scratch_dir
            .as_ref()
            .join(format!("{}_{}", basename, extracted.len()));

        let mut outfile = File::create(&dest)?;
        io::copy(&mut member, &mut outfile)?;

        extracted.push(dest);
    }

    Ok(extracted)
}
