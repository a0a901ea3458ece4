//! Command-line provisioning profile expiry auditor.
//!
//! Walks a directory tree for `.mobileprovision` files and `.ipa` archives,
//! decodes each profile's CMS-signed manifest via the platform `security`
//! utility, and prints one verdict line per profile.

use clap::Parser;
use provcheck::{Auditor, SecurityCms, DEFAULT_SCRATCH_DIR};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "provcheck")]
#[command(about = "Audit provisioning profiles for expiry")]
struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Scratch directory for profiles extracted from archives
    #[arg(long, default_value = DEFAULT_SCRATCH_DIR)]
    scratch_dir: PathBuf,

    /// Decode command; must accept `cms -D -i <input> -o <output>`
    #[arg(long, default_value = "security")]
    decoder: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let auditor = Auditor::new()
        .root(cli.root)
        .scratch_dir(cli.scratch_dir)
        .decoder(SecurityCms::with_command(cli.decoder));

    let mut stdout = io::stdout().lock();
    auditor.run(&mut stdout)?;

    Ok(())
}
