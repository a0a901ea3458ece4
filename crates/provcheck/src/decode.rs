//! CMS decoding of signed provisioning profiles.
//!
//! A `.mobileprovision` file is a CMS-signed plist. Decoding is delegated to
//! an external trust-store utility (`security cms -D` on macOS) behind the
//! [`ProfileDecoder`] trait, so tests can substitute a double that produces
//! canned manifests without spawning anything.

use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Abstract collaborator that turns a signed profile into a plaintext manifest.
pub trait ProfileDecoder {
    /// Decode the signed profile at `input`, writing the plaintext plist to
    /// `output`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the profile is rejected or the decode
    /// utility cannot be run.
    fn decode(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Production decoder invoking the platform trust-store utility.
///
/// Runs `<command> cms -D -i <input> -o <output>` as a synchronous
/// subprocess. A non-zero exit is a decode failure carrying the captured
/// standard-error text; no retry and no timeout are applied.
pub struct SecurityCms {
    command: String,
}

impl SecurityCms {
    /// Decoder using the standard `security` utility.
    pub fn new() -> Self {
        Self::with_command("security")
    }

    /// Decoder using an alternative command accepting the same
    /// `cms -D -i <input> -o <output>` argument convention.
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for SecurityCms {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileDecoder for SecurityCms {
    fn decode(&self, input: &Path, output: &Path) -> Result<()> {
        let result = Command::new(&self.command)
            .arg("cms")
            .arg("-D")
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(output)
            .output()
            .map_err(|e| Error::Decode(format!("failed to run {}: {}", self.command, e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            return Err(Error::Decode(stderr));
        }

        Ok(())
    }
}
