use crate::connector::Connector;

#[derive(Debug, Clone, Copy)]
pub struct IndexSpec {
    pub field: &'static str,
    pub unique: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CollectionIndexes {
    pub name: &'static str,
    pub indexes: &'static [IndexSpec],
}

pub const COLLECTION_INDEXES: &[CollectionIndexes] = &[
    CollectionIndexes {
        name: "vod_sources",
        indexes: &[
            IndexSpec {
                field: "key",
                unique: true,
            },
            IndexSpec {
                field: "enabled",
                unique: false,
            },
            IndexSpec {
                field: "sort_order",
                unique: false,
            },
        ],
    },
    CollectionIndexes {
        name: "vod_source_selection",
        indexes: &[IndexSpec {
            field: "id",
            unique: true,
        }],
    },
    CollectionIndexes {
        name: "dailymotion_channels",
        indexes: &[
            IndexSpec {
                field: "id",
                unique: true,
            },
            IndexSpec {
                field: "username",
                unique: false,
            },
            IndexSpec {
                field: "isActive",
                unique: false,
            },
        ],
    },
    CollectionIndexes {
        name: "dailymotion_config",
        indexes: &[IndexSpec {
            field: "id",
            unique: true,
        }],
    },
];

/// Best-effort index creation after a fresh connect. Failures (typically an
/// index that already exists with different options) are logged and swallowed;
/// they never reach the caller and never reset the connection.
pub(crate) async fn bootstrap<C: Connector>(connector: &C, database: &C::Database) {
    for collection in COLLECTION_INDEXES {
        for index in collection.indexes {
            if let Err(err) = connector
                .create_index(database, collection.name, index)
                .await
            {
                tracing::warn!(
                    collection = collection.name,
                    field = index.field,
                    %err,
                    "failed to create index"
                );
            }
        }
    }
    tracing::info!("database schema initialized");
}
