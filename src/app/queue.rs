use std::collections::{HashSet, VecDeque};

/// FIFO of submission ids awaiting polling. An id is accepted at most once.
#[derive(Debug, Default)]
pub struct InFlightQueue {
    ids: VecDeque<String>,
    seen: HashSet<String>,
}

impl InFlightQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` unless it was queued before. Returns whether it was added.
    pub fn push(&mut self, id: String) -> bool {
        if !self.seen.insert(id.clone()) {
            return false;
        }
        self.ids.push_back(id);
        true
    }

    pub fn pop_front(&mut self) -> Option<String> {
        self.ids.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in polling order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Removes and returns every id still waiting.
    pub fn drain_remaining(&mut self) -> Vec<String> {
        self.ids.drain(..).collect()
    }
}
