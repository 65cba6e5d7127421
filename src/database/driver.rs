use super::{CollectionHandle, DatabaseHandle, MongoClientHandle, MongoConnector};
use crate::utils::DatabaseError;
use async_trait::async_trait;
use mongodb::bson::Document;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

/// Connector backed by the official MongoDB driver.
#[derive(Debug, Clone, Default)]
pub struct DriverConnector;

impl DriverConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MongoConnector for DriverConnector {
    async fn connect(&self, uri: &str) -> Result<Box<dyn MongoClientHandle>, DatabaseError> {
        let mut client_options = ClientOptions::parse(uri).await?;
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(client_options)?;

        Ok(Box::new(DriverClient { client }))
    }
}

struct DriverClient {
    client: Client,
}

impl MongoClientHandle for DriverClient {
    fn database(&self, name: &str) -> Box<dyn DatabaseHandle> {
        Box::new(DriverDatabase {
            db: self.client.database(name),
        })
    }
}

struct DriverDatabase {
    db: Database,
}

impl DatabaseHandle for DriverDatabase {
    fn collection(&self, name: &str) -> Box<dyn CollectionHandle> {
        Box::new(DriverCollection {
            collection: self.db.collection::<Document>(name),
        })
    }
}

struct DriverCollection {
    collection: Collection<Document>,
}

#[async_trait]
impl CollectionHandle for DriverCollection {
    async fn find_one(&self, filter: Document) -> Result<Option<Document>, DatabaseError> {
        Ok(self.collection.find_one(filter).await?)
    }
}
