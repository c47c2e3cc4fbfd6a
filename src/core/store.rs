use crate::core::RecordStore;
use crate::utils::error::{Result, ServiceError};
use std::collections::HashMap;
use std::sync::RwLock;

/// Volatile keyed store. Every upsert takes the write lock once, so readers
/// see either the old record or the new one, never a mix.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    name: &'static str,
    records: RwLock<HashMap<String, T>>,
}

impl<T> InMemoryStore<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn unavailable(&self) -> ServiceError {
        tracing::error!("{} store lock is poisoned", self.name);
        ServiceError::StoreUnavailable { store: self.name }
    }
}

impl<T: Clone + Send + Sync> RecordStore<T> for InMemoryStore<T> {
    fn upsert(&self, key: String, record: T) -> Result<()> {
        let mut records = self.records.write().map_err(|_| self.unavailable())?;
        if records.insert(key.clone(), record).is_some() {
            tracing::debug!("Replaced {} '{}'", self.name, key);
        } else {
            tracing::debug!("Inserted {} '{}'", self.name, key);
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<T>> {
        let records = self.records.read().map_err(|_| self.unavailable())?;
        Ok(records.get(key).cloned())
    }

    fn fold<A, F>(&self, init: A, f: F) -> Result<A>
    where
        F: FnMut(A, &T) -> A,
    {
        let records = self.records.read().map_err(|_| self.unavailable())?;
        Ok(records.values().fold(init, f))
    }
}
