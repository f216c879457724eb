//! Random-pivot partition shared by the in-place quicksorts.

use rand::Rng;

/// Partition `data[low..=high]` around a randomly chosen pivot.
///
/// The pivot is swapped to `low`, the range is scanned once, and the pivot is
/// finally moved to the returned index `counter`. Afterwards every element in
/// `[low, counter)` is strictly less than the pivot and every element in
/// `(counter, high]` is greater than or equal to it. Equal elements therefore
/// all land on the upper side.
///
/// Requires `low < high < data.len()`.
pub fn partition<T: Ord, R: Rng + ?Sized>(
    data: &mut [T],
    low: usize,
    high: usize,
    rng: &mut R,
) -> usize {
    debug_assert!(low < high && high < data.len());

    let part = rng.gen_range(low..=high);
    data.swap(part, low);

    let mut counter = low;
    for i in low + 1..=high {
        if data[i] < data[low] {
            counter += 1;
            data.swap(counter, i);
        }
    }
    data.swap(low, counter);
    counter
}
