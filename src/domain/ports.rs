use crate::utils::error::Result;

/// Keyed collection of records with insert-or-replace semantics.
pub trait RecordStore<T>: Send + Sync {
    /// Inserts `record` at `key`, fully replacing any previous value.
    fn upsert(&self, key: String, record: T) -> Result<()>;

    fn get(&self, key: &str) -> Result<Option<T>>;

    /// Visits every stored record once, in no particular order.
    fn fold<A, F>(&self, init: A, f: F) -> Result<A>
    where
        F: FnMut(A, &T) -> A;
}
