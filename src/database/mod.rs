//! The slice of MongoDB the login rules need: connect, pick a database,
//! pick a collection, find one document.

pub mod driver;
#[cfg(test)]
pub mod memory;

use crate::utils::DatabaseError;
use async_trait::async_trait;
use mongodb::bson::Document;

pub use driver::DriverConnector;

/// Opens a client for a connection string.
#[async_trait]
pub trait MongoConnector: Send + Sync {
    async fn connect(&self, uri: &str) -> Result<Box<dyn MongoClientHandle>, DatabaseError>;
}

pub trait MongoClientHandle: Send + Sync {
    fn database(&self, name: &str) -> Box<dyn DatabaseHandle>;
}

pub trait DatabaseHandle: Send + Sync {
    fn collection(&self, name: &str) -> Box<dyn CollectionHandle>;
}

#[async_trait]
pub trait CollectionHandle: Send + Sync {
    /// First document matching `filter`, `Ok(None)` when nothing matches.
    async fn find_one(&self, filter: Document) -> Result<Option<Document>, DatabaseError>;
}
