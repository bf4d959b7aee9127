// Presentation-side controller around a store

use crate::error::Result;
use crate::filter::Filter;
use crate::record::{Record, RecordId};
use crate::store::Store;
use tracing::debug;

/// Controller state a front end keeps alongside the store
///
/// `next_id` is always derived from the store's key set after a mutation,
/// never counted independently.
#[derive(Debug)]
pub struct Session<T: Record> {
    store: Store<T>,
    next_id: RecordId,
    cursor: Option<RecordId>,
}

impl<T: Record> Default for Session<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Session<T> {
    pub fn new() -> Self {
        Self::with_store(Store::new())
    }

    pub fn with_store(store: Store<T>) -> Self {
        let next_id = store.suggested_next_id();
        Self {
            store,
            next_id,
            cursor: None,
        }
    }

    pub fn store(&self) -> &Store<T> {
        &self.store
    }

    /// Identifier to prefill for the next add
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    /// Identifier of the record last shown by [`cycle`](Self::cycle)
    pub fn cursor(&self) -> Option<RecordId> {
        self.cursor
    }

    pub fn add(&mut self, id: RecordId, record: T) -> Result<String> {
        self.store.add(id, record)?;
        self.refresh_next_id();
        Ok(format!("Added {} {}", T::display_name().to_lowercase(), id))
    }

    /// Add under the suggested next identifier
    pub fn add_next(&mut self, record: T) -> Result<String> {
        self.add(self.next_id, record)
    }

    pub fn delete(&mut self, id: RecordId) -> Result<String> {
        let msg = self.store.delete(id)?;
        self.refresh_next_id();
        Ok(msg)
    }

    pub fn edit(&mut self, id: RecordId, record: T) -> Result<String> {
        let msg = self.store.edit(id, record)?;
        self.refresh_next_id();
        Ok(msg)
    }

    /// Matching records as `id: summary` lines
    pub fn search(&self, filters: &[Filter]) -> Vec<String> {
        self.store
            .search(filters)
            .into_iter()
            .map(|(id, summary)| format!("{}: {}", id, summary))
            .collect()
    }

    /// Step to the next record in identifier order, wrapping at the end
    pub fn cycle(&mut self) -> Option<(RecordId, &T)> {
        self.cursor = self.store.next_after(self.cursor);
        let id = self.cursor?;
        self.store.get(id).map(|record| (id, record))
    }

    fn refresh_next_id(&mut self) {
        self.next_id = self.store.suggested_next_id();
        debug!(collection = T::collection_name(), next_id = self.next_id, "refresh_next_id");
    }
}
