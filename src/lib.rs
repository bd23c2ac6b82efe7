pub mod config;
pub mod connector;
pub mod constants;
pub mod database;
pub mod errors;
pub mod schema;
pub mod utils;

pub use config::Config;
pub use connector::{Connector, MongoConnector};
pub use database::{DbManager, acquire_database, close_database};
pub use errors::Error;
