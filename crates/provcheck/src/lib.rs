pub mod archive;
pub mod audit;
pub mod decode;
pub mod error;
pub mod profile;
pub mod report;
pub mod scan;

pub use audit::{Auditor, DEFAULT_SCRATCH_DIR};
pub use decode::{ProfileDecoder, SecurityCms};
pub use error::Error;
pub use report::{Report, Verdict};

pub type Result<T> = std::result::Result<T, Error>;
