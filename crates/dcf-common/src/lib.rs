//! Common types and utilities for the dcf patcher.
//!
//! This crate provides foundational types used across all dcf crates:
//! - Source spans (`Span`) and the outer/content node range model (`NodeRange`)
//! - Patch configuration (`PatchOptions`)
//! - Recursion limits

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{NodeRange, Span};

// Configuration consumed by the patchers
pub mod options;
pub use options::PatchOptions;

// Centralized limits and thresholds
pub mod limits;
