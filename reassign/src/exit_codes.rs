//! Stable exit codes for the reassign CLI.

/// Every page was attempted (individual page failures are reported, not fatal).
pub const OK: i32 = 0;
/// Config or member lists could not be loaded; no page was attempted.
pub const INVALID: i32 = 1;
