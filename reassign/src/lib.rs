//! Reassign people properties on external-service pages.
//!
//! For each page, people who are no longer current (and not ignored) move
//! from the configured status fields into their "(previous staff)" archive
//! fields, and current members missing from every status field are added to
//! the primary field. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (extraction, reassignment).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config directory, member lists,
//!   page CLI invocation, artifacts).
//!
//! [`adjust`] coordinates the two for each page id given on the command line.

pub mod adjust;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
