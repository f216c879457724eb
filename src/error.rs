//! Error types for the sort kernels and the harness.

use std::io;

use thiserror::Error;

use crate::harness::Algorithm;

/// Failures a sort kernel can report.
///
/// The kernels have no malformed-input paths; the only way to fail is a
/// bounded pending-range stack that is too small for the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("pending-range stack overflow: capacity {capacity}, needed room for {pending} ranges")]
    StackOverflow { capacity: usize, pending: usize },
}

/// Failures while verifying, timing, or reporting a run.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("{algorithm} produced an unsorted result: first mismatch at index {index}")]
    Mismatch { algorithm: Algorithm, index: usize },

    #[error("{algorithm} returned {got} elements, expected {expected}")]
    LengthMismatch {
        algorithm: Algorithm,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Sort(#[from] SortError),

    #[error("could not write report to '{path}': {source}")]
    Report {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub type HarnessResult<T> = Result<T, HarnessError>;
