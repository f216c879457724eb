//! Library Baselines
//!
//! The sorts every kernel is measured against. They are thin wrappers so the
//! harness can time them the same way as the hand-written kernels.
//!
//! - `native`: the standard library's stable sort (driftsort)
//! - `native_unstable`: the standard library's unstable sort (ipnsort)
//! - `parallel`: rayon's parallel unstable sort, the accelerated library
//!   comparison point

use rayon::prelude::*;

/// Sort a slice in-place using the standard library's stable sort.
#[inline]
pub fn sort_stable<T: Ord>(data: &mut [T]) {
    data.sort();
}

/// Sort a slice in-place using the standard library's unstable sort.
#[inline]
pub fn sort_unstable<T: Ord>(data: &mut [T]) {
    data.sort_unstable();
}

/// Sort a slice in-place on all available cores.
///
/// Small inputs are not worth splitting across threads, so they go straight
/// to the single-threaded unstable sort.
pub fn parallel_sort<T: Ord + Send>(data: &mut [T]) {
    if data.len() < 10_000 {
        data.sort_unstable();
        return;
    }
    data.par_sort_unstable();
}
