//! Test helpers shared by the unit tests.

use std::cmp::Ordering;

/// A key that orders by `key` only and remembers where it started.
#[derive(Debug, Clone, Copy)]
pub struct Keyed {
    pub key: u32,
    pub position: usize,
}

impl Keyed {
    pub fn from_keys(keys: &[u32]) -> Vec<Keyed> {
        keys.iter()
            .enumerate()
            .map(|(position, &key)| Keyed { key, position })
            .collect()
    }

    pub fn positions(items: &[Keyed]) -> Vec<usize> {
        items.iter().map(|k| k.position).collect()
    }
}

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Keyed {}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
