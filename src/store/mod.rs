//! Document-store seam for the site's content (projects, skills, experience, testimonials).
//!
//! [`DocumentStore`] is the CRUD + live-query contract a hosted backend would satisfy;
//! [`MemoryStore`](memory::MemoryStore) is the in-process implementation used by tests and the
//! CLI, with optional JSON snapshots on disk.

pub(crate) mod memory;
pub(crate) mod records;

use std::cell::Cell;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::foundation::error::{ScrollkitError, ScrollkitResult};
use records::Record;

/// Field every content record uses for display ordering.
pub const ORDER_FIELD: &str = "order";

/// One stored document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    /// Store-assigned id, unique within its collection.
    pub id: String,
    /// Top-level fields.
    pub data: Map<String, Value>,
}

/// Live-query callback: receives the full, ordered collection after every change.
pub type Listener = Box<dyn FnMut(&[Document])>;

/// Handle for a live query. Delivery stops when it is cancelled or dropped.
#[derive(Debug)]
pub struct Subscription {
    active: Rc<Cell<bool>>,
}

impl Subscription {
    pub(crate) fn new() -> (Self, Rc<Cell<bool>>) {
        let active = Rc::new(Cell::new(true));
        (
            Self {
                active: Rc::clone(&active),
            },
            active,
        )
    }

    /// Stop delivery.
    pub fn cancel(&self) {
        self.active.set(false);
    }

    /// Whether callbacks are still delivered.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

/// CRUD and live-query contract over named collections of JSON documents.
pub trait DocumentStore {
    /// Insert a document and return its new id.
    fn create(&mut self, collection: &str, record: Map<String, Value>) -> ScrollkitResult<String>;

    /// Fetch one document; `Ok(None)` when it does not exist.
    fn read(&self, collection: &str, id: &str) -> ScrollkitResult<Option<Document>>;

    /// Fetch a whole collection sorted by `order_field`.
    fn read_all(&self, collection: &str, order_field: &str) -> ScrollkitResult<Vec<Document>>;

    /// Merge `partial` into an existing document's top-level fields.
    fn update(
        &mut self,
        collection: &str,
        id: &str,
        partial: Map<String, Value>,
    ) -> ScrollkitResult<()>;

    /// Overwrite an existing document's fields wholesale, keeping its id.
    fn replace(
        &mut self,
        collection: &str,
        id: &str,
        record: Map<String, Value>,
    ) -> ScrollkitResult<()>;

    /// Remove a document.
    fn delete(&mut self, collection: &str, id: &str) -> ScrollkitResult<()>;

    /// Watch a collection. The callback runs once immediately and after every change.
    fn subscribe(&mut self, collection: &str, callback: Listener) -> ScrollkitResult<Subscription>;
}

fn to_object<R: Record>(record: &R) -> ScrollkitResult<Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        _ => Err(ScrollkitError::serde(format!(
            "{} record did not serialize to an object",
            R::COLLECTION
        ))),
    }
}

fn from_document<R: Record>(doc: Document) -> ScrollkitResult<(String, R)> {
    let record = serde_json::from_value(Value::Object(doc.data))?;
    Ok((doc.id, record))
}

/// Typed access on top of any [`DocumentStore`].
pub trait RecordStoreExt: DocumentStore {
    /// Validate and insert a typed record into its collection.
    fn create_record<R: Record>(&mut self, record: &R) -> ScrollkitResult<String> {
        record.validate()?;
        self.create(R::COLLECTION, to_object(record)?)
    }

    /// Read a typed record by id.
    fn read_record<R: Record>(&self, id: &str) -> ScrollkitResult<Option<R>> {
        self.read(R::COLLECTION, id)?
            .map(|doc| from_document(doc).map(|(_, r)| r))
            .transpose()
    }

    /// Read every record of a type, in display order.
    fn read_all_records<R: Record>(&self) -> ScrollkitResult<Vec<(String, R)>> {
        self.read_all(R::COLLECTION, ORDER_FIELD)?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Validate and replace a typed record. Fields absent from `record` are cleared.
    fn replace_record<R: Record>(&mut self, id: &str, record: &R) -> ScrollkitResult<()> {
        record.validate()?;
        self.replace(R::COLLECTION, id, to_object(record)?)
    }
}

impl<S: DocumentStore + ?Sized> RecordStoreExt for S {}
