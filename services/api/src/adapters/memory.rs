//! services/api/src/adapters/memory.rs
//!
//! A process-local implementation of the `DocumentStore` port. Used when no
//! database is configured and as the substitute store in tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use tutorhub_core::domain::{
    Collection, DeleteOutcome, Document, Filter, FindOptions, InsertOutcome, UpdateOutcome,
    ID_FIELD,
};
use tutorhub_core::ports::{DocumentStore, PortResult};
use uuid::Uuid;

use super::next_counter_value;

/// Keeps every collection as an insertion-ordered vector of documents.
/// Each operation holds the lock for its whole duration, so single-document
/// mutations are atomic.
#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn has_id(doc: &Document, id: &str) -> bool {
    doc.get(ID_FIELD).and_then(Value::as_str) == Some(id)
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> PortResult<Vec<Document>> {
        let collections = self.collections.read();
        let mut found: Vec<Document> = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default();

        if let Some(sort) = &options.sort {
            // Stable, so ties keep insertion order.
            found.sort_by(|a, b| sort.compare(a, b));
        }
        Ok(found)
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> PortResult<Option<Document>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| has_id(doc, id)))
            .cloned())
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> PortResult<InsertOutcome> {
        let id = Uuid::new_v4().to_string();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .push(document);

        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> PortResult<UpdateOutcome> {
        let mut collections = self.collections.write();
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| has_id(doc, id)))
        else {
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
            });
        };

        let mut modified = false;
        for (field, value) in fields {
            if field == ID_FIELD {
                continue;
            }
            if doc.get(&field) != Some(&value) {
                doc.insert(field, value);
                modified = true;
            }
        }

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> PortResult<DeleteOutcome> {
        let mut collections = self.collections.write();
        let deleted_count = match collections.get_mut(&collection) {
            Some(docs) => match docs.iter().position(|doc| has_id(doc, id)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn increment_by_id(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
    ) -> PortResult<Option<i64>> {
        let mut collections = self.collections.write();
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| has_id(doc, id)))
        else {
            return Ok(None);
        };

        let next = next_counter_value(field, doc.get(field))?;
        doc.insert(field.to_string(), Value::from(next));
        Ok(Some(next))
    }
}
