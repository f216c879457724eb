//! Sort Shootout
//!
//! A small collection of textbook sorting kernels, each verified and timed
//! against the standard library sorts:
//! - **Quicksort, in place**: random pivot, Lomuto-style partition over an inclusive range
//! - **Quicksort, explicit stack**: the same partition without recursion
//! - **Quicksort, three buckets**: stable, returns a new vector
//! - **Quicksort, list comprehension**: consumes its input, two buckets
//! - **Mergesort (three merges)**: front-popping, back-popping, index-walking
//!
//! Every randomized kernel takes its random source as a parameter so runs can
//! be reproduced with a seeded generator.

pub mod baseline_sort;
pub mod error;
pub mod harness;
pub mod lino_report;
pub mod mergesort;
pub mod partition;
pub mod quicksort;
pub mod quicksort_stack;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{HarnessError, HarnessResult, SortError};
pub use mergesort::{mergesort, mergesort2, mergesort3};
pub use quicksort::{quicksort_ip, quicksort_lc, quicksort_val, sort_in_place};
pub use quicksort_stack::{pending_capacity, quicksort_pb, quicksort_pb_bounded};

/// Check if a slice is sorted in ascending order.
#[inline]
pub fn is_sorted<T: Ord>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted(&[1, 2, 3, 4, 5]));
        assert!(is_sorted(&[1, 1, 1, 1]));
        assert!(is_sorted(&[1]));
        assert!(is_sorted::<u32>(&[]));
        assert!(!is_sorted(&[5, 4, 3, 2, 1]));
        assert!(!is_sorted(&[1, 3, 2]));
    }
}
