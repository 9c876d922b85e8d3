//! Shuffled cycling through a fixed pool
//!
//! Randomness is injected as `pick(len) -> index` so callers decide where
//! entropy comes from (thread RNG in the app, fixed sequences in tests).

use std::collections::VecDeque;

/// Fisher-Yates shuffle driven by an injected index picker.
///
/// `pick(n)` must return an index in `0..n`; out-of-range values wrap.
pub fn shuffle<T: Clone>(items: &[T], pick: &mut dyn FnMut(usize) -> usize) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = pick(i + 1) % (i + 1);
        out.swap(i, j);
    }
    out
}

/// Yields every pool item once per cycle in shuffled order.
///
/// A new cycle never starts with the item that ended the previous one.
#[derive(Debug, Clone)]
pub struct ShuffledCycle<T> {
    items: Vec<T>,
    bag: VecDeque<T>,
    last: Option<T>,
}

impl<T: Clone + PartialEq> ShuffledCycle<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            bag: VecDeque::new(),
            last: None,
        }
    }

    pub fn next_item(&mut self, pick: &mut dyn FnMut(usize) -> usize) -> Option<T> {
        if self.bag.is_empty() {
            self.bag = shuffle(&self.items, pick).into();
            if self.bag.len() > 1 && self.bag.front() == self.last.as_ref() {
                self.bag.rotate_left(1);
            }
        }
        let value = self.bag.pop_front()?;
        self.last = Some(value.clone());
        Some(value)
    }
}
