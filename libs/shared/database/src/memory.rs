use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::debug;

use shared_models::RecordId;

struct TableState<T> {
    next_id: RecordId,
    rows: BTreeMap<RecordId, T>,
}

/// An id-keyed in-memory table.
///
/// Ids start at 1 and come from a counter that only moves forward, so an id
/// freed by a delete is never handed out again.
pub struct MemoryTable<T> {
    name: &'static str,
    state: RwLock<TableState<T>>,
}

impl<T: Clone> MemoryTable<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(TableState {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Reserves the next id, builds the row from it and stores it.
    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(RecordId) -> T,
    {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        let row = build(id);
        state.rows.insert(id, row.clone());
        debug!(table = self.name, id, "row inserted");
        row
    }

    pub async fn get(&self, id: RecordId) -> Option<T> {
        self.state.read().await.rows.get(&id).cloned()
    }

    /// All rows in ascending id order.
    pub async fn list(&self) -> Vec<T> {
        self.state.read().await.rows.values().cloned().collect()
    }

    pub async fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.state
            .read()
            .await
            .rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    /// Replaces an existing row with `merge(current)`. Returns `None`, and
    /// leaves the table untouched, when the id is absent.
    pub async fn update_with<F>(&self, id: RecordId, merge: F) -> Option<T>
    where
        F: FnOnce(&T) -> T,
    {
        let mut state = self.state.write().await;
        let row = state.rows.get_mut(&id)?;
        *row = merge(row);
        debug!(table = self.name, id, "row updated");
        Some(row.clone())
    }

    pub async fn remove(&self, id: RecordId) -> Option<T> {
        let removed = self.state.write().await.rows.remove(&id);
        if removed.is_some() {
            debug!(table = self.name, id, "row removed");
        }
        removed
    }

    /// Removes every row matching `predicate` and returns them.
    pub async fn remove_where<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let mut state = self.state.write().await;
        let doomed: Vec<RecordId> = state
            .rows
            .iter()
            .filter(|(_, row)| predicate(row))
            .map(|(id, _)| *id)
            .collect();

        let removed: Vec<T> = doomed
            .iter()
            .filter_map(|id| state.rows.remove(id))
            .collect();

        debug!(table = self.name, count = removed.len(), "rows removed by predicate");
        removed
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.rows.is_empty()
    }
}
