//! # adbcast-core - Core Domain Types
//!
//! Foundation crate for adbcast. Provides error handling, logging setup and
//! the notice types shared by every surface that reports progress to the user.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Notices (`notice`)
//! - [`Notice`] - A transient progress, success or failure message
//! - [`NoticeStyle`] - How a notice should be presented
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use adbcast_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod notice;

/// Prelude for common imports used throughout all adbcast crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use notice::{Notice, NoticeStyle};
