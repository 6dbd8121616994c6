//! State module for tracking walk results
//!
//! This module provides the result types and the shared cache that every trial
//! of a run reads from and writes to.
//!
//! # Components
//!
//! - `Outcome`: The terminal result of resolving one article
//! - `FailureReason`: Why an article did not reach the target
//! - `ResolutionCache`: Visited distances and known failures, shared across trials

mod cache;
mod outcome;

// Re-export main types
pub use cache::{PathLengthHistogram, ResolutionCache, TrialRecord};
pub use outcome::{FailureReason, Outcome, FAILURE_CLICKS};
