use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use mongodb::Database;
use once_cell::sync::Lazy;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::connector::{Connector, MongoConnector};
use crate::errors::Error;
use crate::schema;

type PendingConnect<C> = Shared<
    BoxFuture<'static, Result<(<C as Connector>::Client, <C as Connector>::Database), Error>>,
>;

struct State<C: Connector> {
    client: Option<C::Client>,
    database: Option<C::Database>,
    pending: Option<PendingConnect<C>>,
}

impl<C: Connector> Default for State<C> {
    fn default() -> Self {
        Self {
            client: None,
            database: None,
            pending: None,
        }
    }
}

/// Caches one database connection for the lifetime of the process. The first
/// `acquire` dials and runs schema bootstrap; later calls return the cached
/// handle without touching the network. Concurrent first callers all await a
/// single shared connect attempt, and a failure clears the cache so the next
/// call starts over. A waiter resuming from an old attempt only touches the
/// cache while the pending slot still refers to that attempt, so a stale
/// failure can never wipe a newer dial or evict a healthy connection.
pub struct DbManager<C: Connector> {
    connector: Arc<C>,
    config: Option<Config>,
    state: Mutex<State<C>>,
}

impl<C: Connector> DbManager<C> {
    /// Manager with a fixed configuration, never reading the environment.
    pub fn new(connector: C, config: Config) -> Self {
        Self {
            connector: Arc::new(connector),
            config: Some(config),
            state: Mutex::new(State::default()),
        }
    }

    /// Manager that resolves its configuration from the environment on each
    /// cache miss.
    pub fn from_env(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            config: None,
            state: Mutex::new(State::default()),
        }
    }

    pub async fn acquire(&self) -> Result<C::Database, Error> {
        loop {
            let pending = {
                let mut state = self.state.lock().await;
                if let Some(database) = &state.database {
                    return Ok(database.clone());
                }

                match &state.pending {
                    Some(pending) => pending.clone(),
                    None => {
                        let config = match &self.config {
                            Some(config) => config.clone(),
                            None => Config::from_env()?,
                        };
                        // Stored before the first await, so every caller that
                        // interleaves from here on joins this attempt instead
                        // of dialing again.
                        let connect = Self::establish(Arc::clone(&self.connector), config)
                            .boxed()
                            .shared();
                        state.pending = Some(connect.clone());
                        connect
                    }
                }
            };

            match pending.clone().await {
                Ok((client, database)) => {
                    let mut state = self.state.lock().await;
                    if Self::is_current(&state, &pending) {
                        state.client = Some(client);
                        state.database = Some(database.clone());
                        state.pending = None;
                        return Ok(database);
                    }
                    // The slot moved on while this attempt resolved: close()
                    // ran, or a newer dial took over after a stale failure.
                    if let Some(cached) = state.database.clone() {
                        drop(state);
                        self.connector.close(client).await;
                        return Ok(cached);
                    }
                    if state.pending.is_none() {
                        // close() ran while this dial was in flight; re-cache
                        // the fresh connection.
                        state.client = Some(client);
                        state.database = Some(database.clone());
                        return Ok(database);
                    }
                    // A newer dial is in flight; hang up this connection and
                    // join that attempt instead.
                    drop(state);
                    self.connector.close(client).await;
                }
                Err(err) => {
                    let mut state = self.state.lock().await;
                    // Only the attempt the slot still refers to may reset the
                    // cache; a stale failure must not disturb a newer dial.
                    if Self::is_current(&state, &pending) {
                        state.client = None;
                        state.database = None;
                        state.pending = None;
                    }
                    return Err(err);
                }
            }
        }
    }

    fn is_current(state: &State<C>, attempt: &PendingConnect<C>) -> bool {
        state
            .pending
            .as_ref()
            .is_some_and(|pending| pending.ptr_eq(attempt))
    }

    /// Closes the cached connection if there is one; otherwise a no-op.
    /// Clears the pending slot too, so a later `acquire` reconnects cleanly.
    pub async fn close(&self) {
        let client = {
            let mut state = self.state.lock().await;
            state.database = None;
            state.pending = None;
            state.client.take()
        };

        if let Some(client) = client {
            self.connector.close(client).await;
            tracing::info!("mongodb connection closed");
        }
    }

    async fn establish(
        connector: Arc<C>,
        config: Config,
    ) -> Result<(C::Client, C::Database), Error> {
        let client = match connector.connect(&config.database_uri).await {
            Ok(client) => client,
            Err(err) => {
                tracing::error!(%err, "mongodb connection failed");
                return Err(err);
            }
        };

        let database = connector.database(&client, &config.database_name);
        schema::bootstrap(connector.as_ref(), &database).await;

        tracing::info!(database = %config.database_name, "mongodb connection established");
        Ok((client, database))
    }
}

static MANAGER: Lazy<DbManager<MongoConnector>> =
    Lazy::new(|| DbManager::from_env(MongoConnector));

/// Process-wide entry point: returns the shared database handle, connecting
/// and bootstrapping first if necessary.
pub async fn acquire_database() -> Result<Database, Error> {
    MANAGER.acquire().await
}

/// Releases the process-wide connection during orderly shutdown.
pub async fn close_database() {
    MANAGER.close().await
}
