//! Fixed-capacity, append-only storage.
//!
//! Once full, further pushes are discarded. Nothing is signalled to the
//! caller beyond the returned [`Insert`]; the number of discarded pushes is
//! kept so tests and dashboards can observe it.

/// Outcome of [`Bounded::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    /// Stored at the given zero-based index.
    Inserted(usize),
    /// Capacity was reached; the value was discarded.
    Dropped,
}

impl Insert {
    pub fn is_inserted(self) -> bool {
        matches!(self, Insert::Inserted(_))
    }
}

#[derive(Debug, Clone)]
pub struct Bounded<T> {
    items: Vec<T>,
    capacity: usize,
    dropped: u64,
}

impl<T> Bounded<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Append `value` unless the container is full.
    pub fn push(&mut self, value: T) -> Insert {
        if self.is_full() {
            self.dropped = self.dropped.saturating_add(1);
            return Insert::Dropped;
        }
        self.items.push(value);
        Insert::Inserted(self.items.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pushes discarded because the container was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T: Clone> Bounded<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}
