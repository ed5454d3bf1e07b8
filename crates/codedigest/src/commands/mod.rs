//! CLI command implementations for codedigest

mod common;
mod digest;

pub use common::display_path;
pub use digest::{DigestOptions, digest};
