//! Centralized limits and thresholds.
//!
//! Recursion limits for the parser and the patch traversal live here so both
//! sides bail out at the same depth.

/// Maximum nesting depth for expression parsing and patching.
///
/// Each nested expression adds a frame to the call stack in both the parser
/// and the main-stage traversal.
pub const MAX_AST_DEPTH: u32 = 200;

/// Maximum numeric suffix tried when claiming a free temporary binding name
/// (`needle`, `needle1`, `needle2`, ...).
pub const MAX_BINDING_SUFFIX: u32 = 10_000;
