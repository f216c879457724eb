//! Recursive Quicksort Variants
//!
//! Three randomized quicksorts with different memory behaviour:
//!
//! - [`quicksort_ip`]: in place over an inclusive index range, unstable
//! - [`quicksort_val`]: three buckets (less / equal / greater), returns a new
//!   vector and is stable
//! - [`quicksort_lc`]: two buckets (less / greater-or-equal), takes ownership of
//!   its input and returns the sorted elements
//!
//! All of them pick pivots uniformly at random from the injected generator.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::partition::partition;

/// Sort `data[low..=high]` in place.
///
/// A range with `low >= high` holds at most one element and is left alone.
/// `high` must be a valid index into `data`.
///
/// Only the smaller side of each partition is sorted recursively; the larger
/// side is handled by the loop, so the recursion depth stays within
/// `log2(high - low + 1)`. Duplicates of the pivot go to the upper side. A
/// range left holding nothing but copies of the pivot is already sorted and
/// ends the loop early.
pub fn quicksort_ip<T: Ord, R: Rng + ?Sized>(
    data: &mut [T],
    mut low: usize,
    mut high: usize,
    rng: &mut R,
) {
    while low < high {
        let counter = partition(data, low, high, rng);
        if counter == low && data[low + 1..=high].iter().all(|item| *item == data[low]) {
            return;
        }

        if counter - low < high - counter {
            if counter > low {
                quicksort_ip(data, low, counter - 1, rng);
            }
            low = counter + 1;
        } else {
            // counter > low here, otherwise the left side would be the smaller one
            quicksort_ip(data, counter + 1, high, rng);
            high = counter - 1;
        }
    }
}

/// Sort the whole slice in place with [`quicksort_ip`].
#[inline]
pub fn sort_in_place<T: Ord, R: Rng + ?Sized>(data: &mut [T], rng: &mut R) {
    if data.len() > 1 {
        quicksort_ip(data, 0, data.len() - 1, rng);
    }
}

/// Stable out-of-place quicksort.
///
/// Every element equal to the pivot goes into the center bucket in input
/// order, and the lower and upper buckets keep input order too, so equal
/// elements never swap places. Since the pivot is drawn from the input the
/// center is never empty and both recursive calls work on strictly shorter
/// vectors.
pub fn quicksort_val<T: Ord + Clone, R: Rng + ?Sized>(data: &[T], rng: &mut R) -> Vec<T> {
    let pivot = match data.choose(rng) {
        Some(pivot) if data.len() > 1 => pivot.clone(),
        _ => return data.to_vec(),
    };

    let mut lower = Vec::new();
    let mut center = Vec::new();
    let mut upper = Vec::new();
    for item in data {
        if *item < pivot {
            lower.push(item.clone());
        } else if *item > pivot {
            upper.push(item.clone());
        } else {
            center.push(item.clone());
        }
    }

    let mut sorted = quicksort_val(&lower, rng);
    sorted.extend(center);
    sorted.extend(quicksort_val(&upper, rng));
    sorted
}

/// Quicksort that consumes its input.
///
/// One element is removed at a random position to act as the pivot; the rest
/// is split into lesser and greater-or-equal halves. The lesser half is sorted
/// recursively and the greater half becomes the input of the next round, so
/// runs of equal elements never deepen the recursion. Not stable.
pub fn quicksort_lc<T: Ord, R: Rng + ?Sized>(mut data: Vec<T>, rng: &mut R) -> Vec<T> {
    let mut sorted = Vec::with_capacity(data.len());

    while !data.is_empty() {
        let pivot = data.remove(rng.gen_range(0..data.len()));
        let (lesser, greater): (Vec<T>, Vec<T>) = data.into_iter().partition(|item| *item < pivot);

        sorted.extend(quicksort_lc(lesser, rng));
        let settled = greater.iter().all(|item| *item == pivot);
        sorted.push(pivot);
        if settled {
            sorted.extend(greater);
            break;
        }
        data = greater;
    }
    sorted
}
