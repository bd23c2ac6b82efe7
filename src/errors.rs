use mongodb::error::Error as MongoError;

// Clone is required so every waiter on a shared in-flight connect
// observes the same failure.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Connection(#[from] MongoError),
}
