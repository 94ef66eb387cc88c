//! Ordered record storage backing the in-memory services.

/// Records in insertion order plus the counter for the next generated id.
///
/// The counter starts one past the seeded records, so generated ids never
/// collide with fixture ids and only ever grow.
#[derive(Debug)]
pub struct Collection<T> {
    records: Vec<T>,
    next_id: usize,
}

impl<T> Collection<T> {
    /// Seed a collection with fixture records.
    #[must_use]
    pub fn seeded(records: Vec<T>) -> Self {
        let next_id = records.len() + 1;
        Self { records, next_id }
    }

    /// Take the next id number.
    pub const fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// First record matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.records.iter().find(|record| predicate(record))
    }

    /// Mutable access to the first record matching `predicate`.
    pub fn find_mut(&mut self, predicate: impl Fn(&T) -> bool) -> Option<&mut T> {
        self.records.iter_mut().find(|record| predicate(record))
    }

    /// Records matching `predicate`, in insertion order.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T>
    where
        T: Clone,
    {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Append a record and return a copy of it.
    pub fn insert(&mut self, record: T) -> T
    where
        T: Clone,
    {
        self.records.push(record.clone());
        record
    }
}

/// Fixture-style id: `order-uuid-005`.
#[must_use]
pub fn prefixed_id(kind: &str, number: usize) -> String {
    format!("{kind}-uuid-{number:03}")
}
