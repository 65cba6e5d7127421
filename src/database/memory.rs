//! Deterministic in-memory stand-in for the MongoDB driver.
//!
//! Every call is recorded so tests can assert which connection string,
//! database, collection and filter the code under test used.

use super::{CollectionHandle, DatabaseHandle, MongoClientHandle, MongoConnector};
use crate::utils::DatabaseError;
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Connect(String),
    Database(String),
    Collection(String),
    FindOne { collection: String, filter: Document },
}

#[derive(Default)]
struct State {
    /// collection name -> documents
    documents: HashMap<String, Vec<Document>>,
    /// email -> failure message returned by find_one
    failing_emails: HashMap<String, String>,
    connect_failure: Option<String>,
    calls: Vec<Call>,
}

#[derive(Clone, Default)]
pub struct MemoryConnector {
    state: Arc<Mutex<State>>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, collection: &str, document: Document) -> Self {
        self.lock()
            .documents
            .entry(collection.to_string())
            .or_default()
            .push(document);
        self
    }

    /// Make `find_one` fail for filters on this email.
    pub fn failing_for(self, email: &str, message: &str) -> Self {
        self.lock()
            .failing_emails
            .insert(email.to_string(), message.to_string());
        self
    }

    pub fn failing_connect(self, message: &str) -> Self {
        self.lock().connect_failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn queried_collections(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::FindOne { collection, .. } => Some(collection),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: Call) {
        self.lock().calls.push(call);
    }
}

#[async_trait]
impl MongoConnector for MemoryConnector {
    async fn connect(&self, uri: &str) -> Result<Box<dyn MongoClientHandle>, DatabaseError> {
        self.record(Call::Connect(uri.to_string()));

        if let Some(message) = self.lock().connect_failure.clone() {
            return Err(DatabaseError::new(message));
        }

        Ok(Box::new(MemoryClient { connector: self.clone() }))
    }
}

struct MemoryClient {
    connector: MemoryConnector,
}

impl MongoClientHandle for MemoryClient {
    fn database(&self, name: &str) -> Box<dyn DatabaseHandle> {
        self.connector.record(Call::Database(name.to_string()));
        Box::new(MemoryDatabase {
            connector: self.connector.clone(),
        })
    }
}

struct MemoryDatabase {
    connector: MemoryConnector,
}

impl DatabaseHandle for MemoryDatabase {
    fn collection(&self, name: &str) -> Box<dyn CollectionHandle> {
        self.connector.record(Call::Collection(name.to_string()));
        Box::new(MemoryCollection {
            connector: self.connector.clone(),
            name: name.to_string(),
        })
    }
}

struct MemoryCollection {
    connector: MemoryConnector,
    name: String,
}

#[async_trait]
impl CollectionHandle for MemoryCollection {
    async fn find_one(&self, filter: Document) -> Result<Option<Document>, DatabaseError> {
        self.connector.record(Call::FindOne {
            collection: self.name.clone(),
            filter: filter.clone(),
        });

        let state = self.connector.lock();

        if let Ok(email) = filter.get_str("email") {
            if let Some(message) = state.failing_emails.get(email) {
                return Err(DatabaseError::new(message.clone()));
            }
        }

        let found = state.documents.get(&self.name).and_then(|docs| {
            docs.iter()
                .find(|doc| matches_filter(doc, &filter))
                .cloned()
        });

        Ok(found)
    }
}

/// Equality match on every top-level key of the filter.
fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected): (&String, &Bson)| doc.get(key) == Some(expected))
}
