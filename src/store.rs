// Generic in-memory store with secondary indexes

use crate::error::{Result, StoreError};
use crate::filter::Filter;
use crate::record::{Record, RecordId};
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use tracing::debug;

/// Value -> identifiers currently holding that value, in join order
type SecondaryIndex = BTreeMap<String, Vec<RecordId>>;

/// Generic record store with a primary index and one secondary index per
/// indexed field
///
/// Iteration over the primary index, and therefore the order of search
/// results, is ascending by identifier.
#[derive(Debug, Clone)]
pub struct Store<T: Record> {
    records: BTreeMap<RecordId, T>,
    indexes: HashMap<&'static str, SecondaryIndex>,
}

impl<T: Record> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Store<T> {
    /// Create an empty store with one secondary index per indexed field
    pub fn new() -> Self {
        let indexes = T::indexed_field_names()
            .iter()
            .map(|field| (*field, SecondaryIndex::new()))
            .collect();

        Self {
            records: BTreeMap::new(),
            indexes,
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Insert a record under a new identifier
    pub fn add(&mut self, id: RecordId, record: T) -> Result<()> {
        let collection = T::collection_name();

        if self.records.contains_key(&id) {
            debug!(collection, id, "add: identifier already taken");
            return Err(StoreError::DuplicateIdentifier {
                kind: T::display_name(),
                id,
            });
        }

        for (field, value) in record.indexed_fields() {
            self.index_insert(field, value, id);
        }
        self.records.insert(id, record);

        debug!(collection, id, count = self.records.len(), "add: inserted record");
        Ok(())
    }

    /// Remove a record and every index entry pointing at it
    ///
    /// Returns a confirmation naming the removed record's summary field.
    pub fn delete(&mut self, id: RecordId) -> Result<String> {
        let collection = T::collection_name();

        let record = self.records.remove(&id).ok_or_else(|| {
            debug!(collection, id, "delete: no such record");
            StoreError::NotFound {
                kind: T::display_name(),
                id,
            }
        })?;

        for (field, value) in record.indexed_fields() {
            self.index_remove(field, value, id);
        }

        debug!(collection, id, count = self.records.len(), "delete: removed record");
        Ok(format!("{} {} removed: {}", T::display_name(), id, record.summary()))
    }

    /// Replace the fields of an existing record
    ///
    /// Index entries move only for fields whose value changed; unchanged
    /// fields keep their position in their value sequence.
    pub fn edit(&mut self, id: RecordId, record: T) -> Result<String> {
        let collection = T::collection_name();

        let old = self.records.remove(&id).ok_or_else(|| {
            debug!(collection, id, "edit: no such record");
            StoreError::NotFound {
                kind: T::display_name(),
                id,
            }
        })?;

        self.reindex(id, &old, &record);

        self.records.insert(id, record);
        Ok(format!("{} {} updated", T::display_name(), id))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get a record by ID
    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All identifiers, ascending
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.keys().copied()
    }

    /// Records matching every filter, as full records
    ///
    /// An empty filter list matches everything. If any filter targets an
    /// indexed field, candidates come from that index instead of a full scan.
    pub fn find(&self, filters: &[Filter]) -> Vec<(RecordId, &T)> {
        let indexed = filters
            .iter()
            .find_map(|filter| self.indexes.get(filter.field.as_str()).map(|index| (filter, index)));

        match indexed {
            Some((filter, index)) => {
                let mut ids = index.get(&filter.value).cloned().unwrap_or_default();
                ids.sort_unstable();
                debug!(
                    collection = T::collection_name(),
                    field = %filter.field,
                    candidates = ids.len(),
                    "find: using secondary index"
                );
                ids.into_iter()
                    .filter_map(|id| self.records.get(&id).map(|record| (id, record)))
                    .filter(|(_, record)| filters.iter().all(|f| f.matches(*record)))
                    .collect()
            }
            None => self
                .records
                .iter()
                .filter(|(_, record)| filters.iter().all(|f| f.matches(*record)))
                .map(|(id, record)| (*id, record))
                .collect(),
        }
    }

    /// Records matching every filter, as (identifier, summary) pairs
    pub fn search(&self, filters: &[Filter]) -> Vec<(RecordId, String)> {
        self.find(filters)
            .into_iter()
            .map(|(id, record)| (id, record.summary().to_string()))
            .collect()
    }

    /// Values currently present in a field's secondary index, ascending
    ///
    /// Empty for fields without an index.
    pub fn distinct_values(&self, field: &str) -> Vec<&str> {
        self.indexes
            .get(field)
            .map(|index| index.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Identifiers holding `value` in an indexed field, in join order
    pub fn ids_for(&self, field: &str, value: &str) -> Option<&[RecordId]> {
        self.indexes.get(field)?.get(value).map(Vec::as_slice)
    }

    pub fn max_id(&self) -> Option<RecordId> {
        self.records.keys().next_back().copied()
    }

    /// One past the largest identifier in use, or 1 for an empty store
    pub fn suggested_next_id(&self) -> RecordId {
        self.max_id().map_or(1, |max| max.saturating_add(1))
    }

    /// Smallest identifier after `cursor`, wrapping to the first record
    pub fn next_after(&self, cursor: Option<RecordId>) -> Option<RecordId> {
        cursor
            .and_then(|after| {
                self.records
                    .range((Bound::Excluded(after), Bound::Unbounded))
                    .next()
                    .map(|(id, _)| *id)
            })
            .or_else(|| self.records.keys().next().copied())
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn reindex(&mut self, id: RecordId, old: &T, new: &T) {
        let before = old.indexed_fields();
        let after = new.indexed_fields();

        for &field in T::indexed_field_names() {
            let old_value = before.get(field).copied();
            let new_value = after.get(field).copied();
            if old_value == new_value {
                continue;
            }

            debug!(
                collection = T::collection_name(),
                id,
                field,
                ?old_value,
                ?new_value,
                "reindex: moving index entry"
            );
            if let Some(value) = old_value {
                self.index_remove(field, value, id);
            }
            if let Some(value) = new_value {
                self.index_insert(field, value, id);
            }
        }
    }

    fn index_insert(&mut self, field: &'static str, value: &str, id: RecordId) {
        self.indexes
            .entry(field)
            .or_default()
            .entry(value.to_string())
            .or_default()
            .push(id);
    }

    fn index_remove(&mut self, field: &str, value: &str, id: RecordId) {
        let Some(index) = self.indexes.get_mut(field) else {
            return;
        };
        let Some(ids) = index.get_mut(value) else {
            return;
        };

        ids.retain(|existing| *existing != id);
        if ids.is_empty() {
            index.remove(value);
        }
    }
}
