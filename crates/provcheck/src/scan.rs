//! Directory traversal and candidate classification.
//!
//! Walks a directory tree and picks out the files the auditor cares about:
//! standalone `.mobileprovision` profiles and `.ipa` application archives.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file selected for auditing, classified by how it must be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A standalone provisioning profile, checked directly.
    Profile(PathBuf),
    /// An application archive whose embedded profiles must be extracted first.
    Archive(PathBuf),
}

impl Candidate {
    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        match self {
            Candidate::Profile(path) | Candidate::Archive(path) => path,
        }
    }
}

/// Recursively collect audit candidates under `root`.
///
/// Every regular file is matched by suffix: `.mobileprovision` becomes a
/// [`Candidate::Profile`], `.ipa` a [`Candidate::Archive`]; anything else is
/// ignored. Unreadable directory entries are skipped. Symlinks are not
/// followed, so link cycles cannot trap the walk.
///
/// The returned order is walkdir's traversal order: stable within a run but
/// not contractual.
pub fn candidates(root: &Path) -> Vec<Candidate> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if name.ends_with(".mobileprovision") {
            found.push(Candidate::Profile(path.to_path_buf()));
        } else if name.ends_with(".ipa") {
            found.push(Candidate::Archive(path.to_path_buf()));
        }
    }

    found
}
