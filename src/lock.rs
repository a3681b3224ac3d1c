//! Ten-way striped lock (spec §5): owned by the engine and shared across
//! every index in the process. `index()`/`delete()` acquire the stripe
//! chosen by `hash(index_name) mod stripe_count`, so one index name
//! always serializes to the same mutex while distinct names can proceed
//! in parallel across stripes.

use parking_lot::{Mutex, MutexGuard};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub struct StripedLock {
    stripes: Vec<Mutex<()>>,
}

impl StripedLock {
    pub fn new(stripe_count: usize) -> Self {
        let count = stripe_count.max(1);
        StripedLock { stripes: (0..count).map(|_| Mutex::new(())).collect() }
    }

    fn stripe_for(&self, name: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        (hasher.finish() as usize) % self.stripes.len()
    }

    pub fn lock(&self, name: &str) -> MutexGuard<'_, ()> {
        self.stripes[self.stripe_for(name)].lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_always_maps_to_same_stripe() {
        let locks = StripedLock::new(10);
        let first = locks.stripe_for("my_index");
        let second = locks.stripe_for("my_index");
        assert_eq!(first, second);
    }
}
