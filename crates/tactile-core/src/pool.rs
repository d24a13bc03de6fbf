//! Slot pool for the small, short-lived per-touch records.
//!
//! Only a handful of fingers are ever down at once, so entries live inline and
//! freed slots are recycled instead of shifting the remaining entries around.

use smallvec::SmallVec;

const INLINE_SLOTS: usize = 8;

#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: SmallVec<[Option<T>; INLINE_SLOTS]>,
    live: usize,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: SmallVec::new(),
            live: 0,
        }
    }

    /// Stores `value` in the first free slot and returns its index.
    pub fn acquire_slot(&mut self, value: T) -> usize {
        self.live += 1;
        if let Some(index) = self.slots.iter().position(Option::is_none) {
            self.slots[index] = Some(value);
            return index;
        }
        self.slots.push(Some(value));
        self.slots.len() - 1
    }

    pub fn free_slot(&mut self, index: usize) -> Option<T> {
        let freed = self.slots.get_mut(index).and_then(Option::take);
        if freed.is_some() {
            self.live -= 1;
        }
        freed
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    pub fn position(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(&mut predicate))
    }

    pub fn find(&self, predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.position(predicate).and_then(|index| self.get(index))
    }

    pub fn find_mut(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<&mut T> {
        self.position(predicate)
            .and_then(move |index| self.get_mut(index))
    }

    /// Frees every entry for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        for slot in self.slots.iter_mut() {
            if let Some(value) = slot {
                if !keep(value) {
                    *slot = None;
                    self.live -= 1;
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slots_are_recycled() {
        let mut pool = Pool::new();
        let a = pool.acquire_slot('a');
        let b = pool.acquire_slot('b');
        assert_eq!(pool.free_slot(a), Some('a'));
        let c = pool.acquire_slot('c');
        assert_eq!(c, a);
        assert_eq!(pool.get(b), Some(&'b'));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn retain_updates_live_count() {
        let mut pool = Pool::new();
        for value in 0..10 {
            pool.acquire_slot(value);
        }
        pool.retain(|value| *value % 2 == 0);
        assert_eq!(pool.len(), 5);
        assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
        assert_eq!(pool.free_slot(1), None);
        assert_eq!(pool.len(), 5);
    }
}
