//! # modgraph-error
//!
//! Unified error handling for modgraph.
//!
//! - **ErrorKind**: what went wrong (e.g. `InvalidFormat`, `RenderFailed`)
//! - **ErrorStatus**: whether trying again could help
//! - **Context**: the failing operation plus key/value pairs such as paths
//! - **Source**: the wrapped underlying error, if any
//!
//! ## Usage
//!
//! ```rust
//! use modgraph_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InvalidFormat, "duplicate module")
//!         .with_operation("manifest::load")
//!         .with_context("module", "core"))
//! }
//! ```
//!
//! External errors are wrapped with `set_source(err)`. An error is handled
//! once; callers further up only append context.

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using modgraph Error
pub type Result<T> = std::result::Result<T, Error>;
