//! Ordered, append-only queue of deferred items.

/// Items registered during processing, kept in insertion order until the
/// rendering pass that consumes them clears the queue.
///
/// The queue never reorders or deduplicates.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    items: Vec<T>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` to the end of the queue.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Every queued item, in insertion order. Does not drain.
    pub fn queue(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a, T> IntoIterator for &'a DeferredQueue<T> {
    type IntoIter = std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
