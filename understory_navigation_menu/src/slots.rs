// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage backing menu and item handles.

use alloc::vec::Vec;

use crate::types::{ItemId, MenuId};

pub(crate) trait SlotKey: Copy {
    fn from_parts(idx: u32, generation: u32) -> Self;
    fn idx(self) -> usize;
    fn generation(self) -> u32;
}

impl SlotKey for MenuId {
    fn from_parts(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }
    fn idx(self) -> usize {
        self.0 as usize
    }
    fn generation(self) -> u32 {
        self.1
    }
}

impl SlotKey for ItemId {
    fn from_parts(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }
    fn idx(self) -> usize {
        self.0 as usize
    }
    fn generation(self) -> u32 {
        self.1
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Slots<K, T> {
    /// slots
    entries: Vec<Option<T>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    _key: core::marker::PhantomData<fn() -> K>,
}

impl<K: SlotKey, T> Slots<K, T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            _key: core::marker::PhantomData,
        }
    }

    pub(crate) fn insert(&mut self, value: T) -> K {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.entries[idx] = Some(value);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Handles carry 32-bit slot indices."
            )]
            K::from_parts(idx as u32, generation)
        } else {
            self.entries.push(Some(value));
            self.generations.push(1);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Handles carry 32-bit slot indices."
            )]
            K::from_parts((self.entries.len() - 1) as u32, 1)
        }
    }

    pub(crate) fn is_alive(&self, key: K) -> bool {
        self.generations.get(key.idx()) == Some(&key.generation())
            && self.entries[key.idx()].is_some()
    }

    pub(crate) fn get(&self, key: K) -> Option<&T> {
        if !self.is_alive(key) {
            return None;
        }
        self.entries[key.idx()].as_ref()
    }

    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut T> {
        if !self.is_alive(key) {
            return None;
        }
        self.entries[key.idx()].as_mut()
    }

    pub(crate) fn remove(&mut self, key: K) -> Option<T> {
        if !self.is_alive(key) {
            return None;
        }
        let value = self.entries[key.idx()].take();
        self.free_list.push(key.idx());
        value
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().filter_map(Option::as_mut)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_handles_do_not_alias_reused_slots() {
        let mut slots: Slots<ItemId, &str> = Slots::new();
        let a = slots.insert("a");
        assert_eq!(slots.remove(a), Some("a"));
        let b = slots.insert("b");
        assert_eq!(a.idx(), b.idx());
        assert!(!slots.is_alive(a));
        assert_eq!(slots.get(a), None);
        assert_eq!(slots.get(b), Some(&"b"));
        assert_eq!(slots.remove(a), None);
        assert_eq!(slots.len(), 1);
    }
}
