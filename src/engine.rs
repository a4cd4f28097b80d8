//! Read and write algorithms behind every generated accessor.
//!
//! Both engines work on the raw map fetched fresh from the record on each
//! call and validate the target locale against the locale set passed in,
//! which callers take from the *current* settings.

/// Fallback resolution
pub mod read;
/// Single-locale mutation
pub mod write;

pub use read::{
    locale_matches,
    read,
};
pub use write::{
    WriteRequest,
    write,
};
