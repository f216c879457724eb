//! Mergesort Variants
//!
//! Three top-down mergesorts that split at `len / 2`, sort both halves
//! recursively and merge the two runs. They differ only in how the merge
//! walks the runs:
//!
//! 1. [`mergesort`] pops the front of each run
//! 2. [`mergesort2`] pops the back of each run and reverses the result once
//! 3. [`mergesort3`] walks both runs with index cursors
//!
//! All three are stable and produce identical orderings for identical input.

use std::collections::VecDeque;

/// Stable mergesort that merges by popping run fronts.
pub fn mergesort<T: Ord + Clone>(data: &[T]) -> Vec<T> {
    if data.len() <= 1 {
        return data.to_vec();
    }
    let (left, right) = data.split_at(data.len() / 2);
    merge(mergesort(left), mergesort(right))
}

fn merge<T: Ord>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut result = Vec::with_capacity(left.len() + right.len());
    let mut left = VecDeque::from(left);
    let mut right = VecDeque::from(right);

    loop {
        let take_left = match (left.front(), right.front()) {
            (Some(a), Some(b)) => a <= b,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.pop_front() } else { right.pop_front() };
        result.extend(next);
    }
    result
}

/// Stable mergesort that merges by popping run backs.
pub fn mergesort2<T: Ord + Clone>(data: &[T]) -> Vec<T> {
    if data.len() <= 1 {
        return data.to_vec();
    }
    let (left, right) = data.split_at(data.len() / 2);
    merge2(mergesort2(left), mergesort2(right))
}

fn merge2<T: Ord>(mut left: Vec<T>, mut right: Vec<T>) -> Vec<T> {
    let mut result = Vec::with_capacity(left.len() + right.len());

    // Largest values go in first. On a tie the right run's tail must be taken
    // so that, once reversed, equal elements from the left run come first.
    loop {
        let take_left = match (left.last(), right.last()) {
            (Some(a), Some(b)) => a > b,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.pop() } else { right.pop() };
        result.extend(next);
    }

    result.reverse();
    result
}

/// Stable mergesort that merges with two forward cursors.
pub fn mergesort3<T: Ord + Clone>(data: &[T]) -> Vec<T> {
    if data.len() <= 1 {
        return data.to_vec();
    }
    let (left, right) = data.split_at(data.len() / 2);
    merge3(&mergesort3(left), &mergesort3(right))
}

fn merge3<T: Ord + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    let mut result = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            result.push(left[i].clone());
            i += 1;
        } else {
            result.push(right[j].clone());
            j += 1;
        }
    }
    result.extend_from_slice(&left[i..]);
    result.extend_from_slice(&right[j..]);
    result
}
