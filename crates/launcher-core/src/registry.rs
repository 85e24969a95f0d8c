//! Ordered list of shortcuts, persisted under the `shortcuts` key.

use std::collections::HashSet;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::StoreError,
    models::{ShortcutId, ShortcutRecord},
    store::{Store, KEY_SHORTCUTS},
};

#[derive(Debug, Default, Clone)]
pub struct ShortcutRegistry {
    shortcuts: Vec<ShortcutRecord>,
    next_id: u64,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from previously persisted records, assigning ids to
    /// records that lack one and to any duplicate ids. `u64::MAX` is never a
    /// valid id and is reassigned as well.
    pub fn from_records(records: Vec<ShortcutRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|record| record.id)
            .filter_map(|id| id.0.checked_add(1))
            .max()
            .unwrap_or(0);

        let mut seen = HashSet::new();
        let shortcuts = records
            .into_iter()
            .map(|mut record| {
                let keep = record
                    .id
                    .is_some_and(|id| id.0 != u64::MAX && seen.insert(id));
                if !keep {
                    record.id = None;
                }
                record
            })
            .collect();

        let mut registry = Self { shortcuts, next_id };
        for index in 0..registry.shortcuts.len() {
            if registry.shortcuts[index].id.is_none() {
                let id = registry.allocate_id();
                registry.shortcuts[index].id = Some(id);
            }
        }
        registry
    }

    /// Reads the `shortcuts` key record by record. A malformed record is
    /// skipped so the rest of the list survives the next write.
    pub fn load(store: &Store) -> Self {
        let values: Vec<Value> = store.get(KEY_SHORTCUTS, Vec::new());
        let records: Vec<ShortcutRecord> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match ShortcutRecord::deserialize(&value) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("skipping malformed shortcut #{index}: {err}");
                    None
                }
            })
            .collect();
        debug!("loaded {} shortcuts", records.len());
        Self::from_records(records)
    }

    pub fn save(&self, store: &mut Store) -> Result<(), StoreError> {
        store.set(KEY_SHORTCUTS, &self.shortcuts)
    }

    pub fn list(&self) -> &[ShortcutRecord] {
        &self.shortcuts
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    /// Appends a shortcut. An empty path (cancelled picker) is ignored.
    pub fn add(&mut self, path: &str) -> Option<ShortcutId> {
        if path.trim().is_empty() {
            return None;
        }

        let id = self.allocate_id();
        self.shortcuts.push(ShortcutRecord::new(id, path));
        Some(id)
    }

    /// Hands out `next_id`, or the lowest free id once the counter has run
    /// out.
    fn allocate_id(&mut self) -> ShortcutId {
        if self.next_id < u64::MAX {
            let id = ShortcutId(self.next_id);
            self.next_id += 1;
            return id;
        }

        let mut candidate = 0;
        while self.index_of(ShortcutId(candidate)).is_some() {
            candidate += 1;
        }
        ShortcutId(candidate)
    }

    pub fn remove(&mut self, index: usize) -> Option<ShortcutRecord> {
        if index >= self.shortcuts.len() {
            debug!("ignoring removal of out-of-range shortcut index {index}");
            return None;
        }
        Some(self.shortcuts.remove(index))
    }

    pub fn set_custom_icon(&mut self, index: usize, icon: Option<&str>) -> bool {
        let Some(record) = self.shortcuts.get_mut(index) else {
            debug!("ignoring icon update for out-of-range shortcut index {index}");
            return false;
        };
        record.custom_icon = icon
            .map(str::trim)
            .filter(|icon| !icon.is_empty())
            .map(str::to_string);
        true
    }

    pub fn index_of(&self, id: ShortcutId) -> Option<usize> {
        self.shortcuts
            .iter()
            .position(|record| record.id == Some(id))
    }

    pub fn get(&self, id: ShortcutId) -> Option<&ShortcutRecord> {
        self.index_of(id).map(|index| &self.shortcuts[index])
    }

    pub fn remove_by_id(&mut self, id: ShortcutId) -> Option<ShortcutRecord> {
        self.index_of(id).and_then(|index| self.remove(index))
    }

    pub fn set_custom_icon_by_id(&mut self, id: ShortcutId, icon: Option<&str>) -> bool {
        match self.index_of(id) {
            Some(index) => self.set_custom_icon(index, icon),
            None => false,
        }
    }
}
