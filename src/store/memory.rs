use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::foundation::error::{ScrollkitError, ScrollkitResult};
use crate::store::{DocumentStore, Document, Listener, ORDER_FIELD, Subscription};

struct Watcher {
    collection: String,
    active: Rc<Cell<bool>>,
    callback: Listener,
}

#[derive(Default, serde::Serialize, serde::Deserialize)]
struct Snapshot {
    #[serde(default)]
    next_seq: BTreeMap<String, u64>,
    #[serde(default)]
    collections: BTreeMap<String, Vec<Document>>,
}

/// In-process [`DocumentStore`].
///
/// Ids are `"<collection>-<n>"` with `n` counting up per collection and never reused.
#[derive(Default)]
pub struct MemoryStore {
    collections: BTreeMap<String, BTreeMap<String, Map<String, Value>>>,
    next_seq: BTreeMap<String, u64>,
    watchers: Vec<Watcher>,
    read_only: bool,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("collections", &self.collections)
            .field("watchers", &self.watchers.len())
            .field("read_only", &self.read_only)
            .finish()
    }
}

/// Sort key comparison: numbers numerically, then strings lexically, missing fields last.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            Some(Value::Number(_)) => 0,
            Some(Value::String(_)) => 1,
            Some(Value::Null) | None => 3,
            Some(_) => 2,
        }
    }
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

impl MemoryStore {
    /// Empty, writable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse (or allow again) every write with a permission error.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, BTreeMap::len)
    }

    /// Names of collections that have held at least one document.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Live subscriptions, across all collections.
    pub fn subscriber_count(&self) -> usize {
        self.watchers.iter().filter(|w| w.active.get()).count()
    }

    /// Restore a store written by [`MemoryStore::save_json`].
    pub fn from_reader<R: std::io::Read>(reader: R) -> ScrollkitResult<Self> {
        let snap: Snapshot = serde_json::from_reader(reader)
            .map_err(|e| ScrollkitError::validation(format!("parse store snapshot JSON: {e}")))?;
        let mut store = Self {
            next_seq: snap.next_seq,
            ..Self::default()
        };
        for (name, docs) in snap.collections {
            let coll = store.collections.entry(name.clone()).or_default();
            let prefix = format!("{name}-");
            let mut highest = 0;
            for doc in docs {
                if let Some(n) = doc.id.strip_prefix(&prefix).and_then(|n| n.parse::<u64>().ok()) {
                    highest = highest.max(n);
                }
                if coll.insert(doc.id.clone(), doc.data).is_some() {
                    return Err(ScrollkitError::validation(format!(
                        "store snapshot has duplicate id '{}' in '{name}'",
                        doc.id
                    )));
                }
            }
            let seq = store.next_seq.entry(name).or_insert(0);
            *seq = (*seq).max(highest);
        }
        Ok(store)
    }

    /// Restore a store from a JSON snapshot file.
    pub fn load_json(path: impl AsRef<Path>) -> ScrollkitResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            ScrollkitError::validation(format!("open store snapshot '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    /// Write every collection as pretty JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> ScrollkitResult<()> {
        let path = path.as_ref();
        let snap = Snapshot {
            next_seq: self.next_seq.clone(),
            collections: self
                .collections
                .iter()
                .map(|(name, docs)| {
                    let docs = docs
                        .iter()
                        .map(|(id, data)| Document {
                            id: id.clone(),
                            data: data.clone(),
                        })
                        .collect();
                    (name.clone(), docs)
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&snap)?;
        std::fs::write(path, json).map_err(|e| {
            ScrollkitError::Other(anyhow::anyhow!(
                "write store snapshot '{}': {e}",
                path.display()
            ))
        })
    }

    fn ensure_writable(&self, op: &str, collection: &str) -> ScrollkitResult<()> {
        if self.read_only {
            return Err(ScrollkitError::permission(format!(
                "{op} on '{collection}' rejected: store is read-only"
            )));
        }
        Ok(())
    }

    fn sorted(&self, collection: &str, order_field: &str) -> Vec<Document> {
        let Some(coll) = self.collections.get(collection) else {
            return Vec::new();
        };
        let mut docs: Vec<Document> = coll
            .iter()
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect();
        docs.sort_by(|a, b| {
            compare_field(a.data.get(order_field), b.data.get(order_field))
                .then_with(|| a.id.cmp(&b.id))
        });
        docs
    }

    fn notify(&mut self, collection: &str) {
        self.watchers.retain(|w| w.active.get());
        if !self.watchers.iter().any(|w| w.collection == collection) {
            return;
        }
        let docs = self.sorted(collection, ORDER_FIELD);
        for w in self.watchers.iter_mut().filter(|w| w.collection == collection) {
            (w.callback)(&docs);
        }
    }
}

impl DocumentStore for MemoryStore {
    #[tracing::instrument(level = "debug", skip(self, record))]
    fn create(&mut self, collection: &str, record: Map<String, Value>) -> ScrollkitResult<String> {
        self.ensure_writable("create", collection)?;
        if collection.is_empty() {
            return Err(ScrollkitError::validation("collection name must be non-empty"));
        }
        let seq = self.next_seq.entry(collection.to_owned()).or_insert(0);
        *seq += 1;
        let id = format!("{collection}-{seq}");
        self.collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id.clone(), record);
        tracing::debug!(%id, "document created");
        self.notify(collection);
        Ok(id)
    }

    fn read(&self, collection: &str, id: &str) -> ScrollkitResult<Option<Document>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|c| c.get(id))
            .map(|data| Document {
                id: id.to_owned(),
                data: data.clone(),
            }))
    }

    fn read_all(&self, collection: &str, order_field: &str) -> ScrollkitResult<Vec<Document>> {
        Ok(self.sorted(collection, order_field))
    }

    #[tracing::instrument(level = "debug", skip(self, partial))]
    fn update(
        &mut self,
        collection: &str,
        id: &str,
        partial: Map<String, Value>,
    ) -> ScrollkitResult<()> {
        self.ensure_writable("update", collection)?;
        let doc = self
            .collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| ScrollkitError::not_found(collection, id))?;
        doc.extend(partial);
        self.notify(collection);
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self, record))]
    fn replace(
        &mut self,
        collection: &str,
        id: &str,
        record: Map<String, Value>,
    ) -> ScrollkitResult<()> {
        self.ensure_writable("replace", collection)?;
        let doc = self
            .collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| ScrollkitError::not_found(collection, id))?;
        *doc = record;
        self.notify(collection);
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn delete(&mut self, collection: &str, id: &str) -> ScrollkitResult<()> {
        self.ensure_writable("delete", collection)?;
        self.collections
            .get_mut(collection)
            .and_then(|c| c.remove(id))
            .ok_or_else(|| ScrollkitError::not_found(collection, id))?;
        self.notify(collection);
        Ok(())
    }

    fn subscribe(
        &mut self,
        collection: &str,
        mut callback: Listener,
    ) -> ScrollkitResult<Subscription> {
        callback(&self.sorted(collection, ORDER_FIELD));
        let (sub, active) = Subscription::new();
        self.watchers.push(Watcher {
            collection: collection.to_owned(),
            active,
            callback,
        });
        Ok(sub)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/memory.rs"]
mod tests;
