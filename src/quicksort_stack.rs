//! Iterative Quicksort
//!
//! The same random-pivot partition as [`crate::quicksort::quicksort_ip`], with
//! the recursion replaced by an explicit stack of pending `(low, high)` ranges.
//!
//! After each partition the larger sub-range is pushed first and the smaller
//! one is processed next. Every range on the stack is then at most half the
//! size of the one below it, so no more than `floor(log2 n) + 1` ranges are
//! ever pending (see [`pending_capacity`]).

use std::convert::Infallible;

use rand::Rng;

use crate::error::SortError;
use crate::partition::partition;

/// A pending inclusive index range.
type Range = (usize, usize);

/// Upper bound on simultaneously pending ranges when sorting `len` elements.
#[inline]
pub fn pending_capacity(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

/// Where `drain` keeps the ranges it still has to partition.
trait PendingRanges {
    type Error;

    fn push(&mut self, range: Range) -> Result<(), Self::Error>;
    fn pop(&mut self) -> Option<Range>;
}

/// A plain vector grows on demand and never rejects a range.
impl PendingRanges for Vec<Range> {
    type Error = Infallible;

    #[inline]
    fn push(&mut self, range: Range) -> Result<(), Infallible> {
        Vec::push(self, range);
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> Option<Range> {
        Vec::pop(self)
    }
}

/// Stack of pending ranges capped at a fixed capacity.
#[derive(Debug)]
struct BoundedStack {
    ranges: Vec<Range>,
    capacity: usize,
}

impl BoundedStack {
    fn new(capacity: usize) -> Self {
        BoundedStack {
            ranges: Vec::with_capacity(capacity),
            capacity,
        }
    }
}

impl PendingRanges for BoundedStack {
    type Error = SortError;

    fn push(&mut self, range: Range) -> Result<(), SortError> {
        if self.ranges.len() >= self.capacity {
            return Err(SortError::StackOverflow {
                capacity: self.capacity,
                pending: self.ranges.len() + 1,
            });
        }
        self.ranges.push(range);
        Ok(())
    }

    fn pop(&mut self) -> Option<Range> {
        self.ranges.pop()
    }
}

/// Sort `data` in place without recursion.
pub fn quicksort_pb<T: Ord, R: Rng + ?Sized>(data: &mut [T], rng: &mut R) {
    let mut stack: Vec<Range> = Vec::with_capacity(pending_capacity(data.len()));
    match drain(data, &mut stack, rng) {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Sort `data` in place with at most `capacity` pending ranges.
///
/// Returns [`SortError::StackOverflow`] instead of growing past the bound.
/// Elements may be partially sorted when that happens. A capacity of
/// [`pending_capacity`]`(data.len())` always suffices.
pub fn quicksort_pb_bounded<T: Ord, R: Rng + ?Sized>(
    data: &mut [T],
    capacity: usize,
    rng: &mut R,
) -> Result<(), SortError> {
    let mut stack = BoundedStack::new(capacity);
    drain(data, &mut stack, rng)
}

fn drain<T: Ord, R: Rng + ?Sized, S: PendingRanges>(
    data: &mut [T],
    stack: &mut S,
    rng: &mut R,
) -> Result<(), S::Error> {
    if data.len() <= 1 {
        return Ok(());
    }
    stack.push((0, data.len() - 1))?;

    while let Some((low, high)) = stack.pop() {
        let counter = partition(data, low, high, rng);
        // nothing but copies of the pivot left
        if counter == low && data[low + 1..=high].iter().all(|item| *item == data[low]) {
            continue;
        }

        let left = (counter > low + 1).then(|| (low, counter - 1));
        let right = (counter + 1 < high).then(|| (counter + 1, high));

        match (left, right) {
            (Some(l), Some(r)) => {
                let (larger, smaller) = if l.1 - l.0 >= r.1 - r.0 { (l, r) } else { (r, l) };
                stack.push(larger)?;
                stack.push(smaller)?;
            }
            (Some(only), None) | (None, Some(only)) => stack.push(only)?,
            (None, None) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_sorted;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_pending_capacity() {
        assert_eq!(pending_capacity(0), 0);
        assert_eq!(pending_capacity(1), 1);
        assert_eq!(pending_capacity(2), 2);
        assert_eq!(pending_capacity(3), 2);
        assert_eq!(pending_capacity(1024), 11);
        assert_eq!(pending_capacity(1_000_000), 20);
    }

    #[test]
    fn test_quicksort_pb_empty_and_single() {
        let mut empty: Vec<u32> = vec![];
        quicksort_pb(&mut empty, &mut rng());
        assert!(empty.is_empty());

        let mut single = vec![42u32];
        quicksort_pb(&mut single, &mut rng());
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_quicksort_pb_scenario() {
        let mut data = vec![5u32, 3, 3, 1, 4, 1, 5, 9, 2, 6];
        quicksort_pb(&mut data, &mut rng());
        assert_eq!(data, vec![1, 1, 2, 3, 3, 4, 5, 5, 6, 9]);
    }

    #[test]
    fn test_quicksort_pb_two_elements() {
        let mut data = vec![5u32, 3];
        quicksort_pb(&mut data, &mut rng());
        assert_eq!(data, vec![3, 5]);
    }

    #[test]
    fn test_bounded_stack_rejects_push_past_capacity() {
        let mut stack = BoundedStack::new(2);
        stack.push((0, 9)).unwrap();
        stack.push((0, 4)).unwrap();
        assert_eq!(
            stack.push((0, 1)),
            Err(SortError::StackOverflow {
                capacity: 2,
                pending: 3
            })
        );
        assert_eq!(stack.pop(), Some((0, 4)));
        assert!(stack.push((5, 9)).is_ok());
    }

    #[test]
    fn test_quicksort_pb_growable_large_input() {
        let mut rng = rng();
        let mut data: Vec<u32> = (0..300_000).map(|_| rng.gen()).collect();
        let mut expected = data.clone();
        expected.sort_unstable();
        quicksort_pb(&mut data, &mut rng);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_quicksort_pb_all_same_large() {
        let mut data = vec![3u32; 100_000];
        quicksort_pb(&mut data, &mut rng());
        assert_eq!(data, vec![3u32; 100_000]);
    }

    #[test]
    fn test_quicksort_pb_all_same() {
        let mut data = vec![3u32; 2_000];
        quicksort_pb_bounded(&mut data, pending_capacity(2_000), &mut rng()).unwrap();
        assert!(data.iter().all(|&x| x == 3));
    }

    #[test]
    fn test_quicksort_pb_bounded_large_input_fits() {
        let mut rng = rng();
        for &size in &[2usize, 3, 17, 1_000, 200_000] {
            let mut data: Vec<u32> = (0..size).map(|_| rng.gen()).collect();
            let mut expected = data.clone();
            expected.sort_unstable();
            quicksort_pb_bounded(&mut data, pending_capacity(size), &mut rng).unwrap();
            assert_eq!(data, expected);
        }
    }

    #[test]
    fn test_quicksort_pb_bounded_sorted_and_reverse_fit() {
        let size = 100_000u32;
        let mut sorted: Vec<u32> = (0..size).collect();
        let mut reverse: Vec<u32> = (0..size).rev().collect();
        let capacity = pending_capacity(size as usize);
        quicksort_pb_bounded(&mut sorted, capacity, &mut rng()).unwrap();
        quicksort_pb_bounded(&mut reverse, capacity, &mut rng()).unwrap();
        assert!(is_sorted(&sorted));
        assert!(is_sorted(&reverse));
    }

    #[test]
    fn test_quicksort_pb_bounded_reports_overflow() {
        let mut data: Vec<u32> = (0..64).rev().collect();
        let err = quicksort_pb_bounded(&mut data, 0, &mut rng()).unwrap_err();
        assert_eq!(
            err,
            SortError::StackOverflow {
                capacity: 0,
                pending: 1
            }
        );
    }

    #[test]
    fn test_quicksort_pb_bounded_small_capacity_overflows_not_corrupts() {
        let mut rng = rng();
        let mut data: Vec<u32> = (0..4_096).map(|_| rng.gen()).collect();
        let mut expected = data.clone();
        expected.sort_unstable();

        match quicksort_pb_bounded(&mut data, 1, &mut rng) {
            Err(SortError::StackOverflow { capacity, .. }) => assert_eq!(capacity, 1),
            Ok(()) => panic!("a single slot cannot hold both sides of a partition"),
        }
        data.sort_unstable();
        assert_eq!(data, expected);
    }
}
