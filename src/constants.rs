pub const ENV_DATABASE_URI: &str = "MONGODB_URI";
pub const ENV_DATABASE_NAME: &str = "MONGODB_DB_NAME";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

pub const DEFAULT_DATABASE_NAME: &str = "kerkerker";
