use async_trait::async_trait;
use mongodb::bson::Document;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

use crate::errors::Error;
use crate::schema::IndexSpec;

/// The capability surface this crate needs from a database server: dial,
/// derive a named database, create an index, hang up.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Client: Clone + Send + Sync + 'static;
    type Database: Clone + Send + Sync + 'static;

    async fn connect(&self, uri: &str) -> Result<Self::Client, Error>;

    fn database(&self, client: &Self::Client, name: &str) -> Self::Database;

    async fn create_index(
        &self,
        database: &Self::Database,
        collection: &str,
        index: &IndexSpec,
    ) -> Result<(), Error>;

    async fn close(&self, client: Self::Client);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MongoConnector;

#[async_trait]
impl Connector for MongoConnector {
    type Client = Client;
    type Database = Database;

    async fn connect(&self, uri: &str) -> Result<Client, Error> {
        Ok(Client::with_uri_str(uri).await?)
    }

    fn database(&self, client: &Client, name: &str) -> Database {
        client.database(name)
    }

    async fn create_index(
        &self,
        database: &Database,
        collection: &str,
        index: &IndexSpec,
    ) -> Result<(), Error> {
        let mut keys = Document::new();
        keys.insert(index.field, 1);

        let model = if index.unique {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build()
        } else {
            IndexModel::builder().keys(keys).build()
        };

        database
            .collection::<Document>(collection)
            .create_index(model)
            .await?;
        Ok(())
    }

    async fn close(&self, client: Client) {
        client.shutdown().await;
    }
}
