use crate::catalog::EntityKind;
use crate::projection::{Field, Record};
use serde::{Deserialize, Serialize};

/// One file inside a torrent
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Path relative to the torrent's base directory
    pub path: String,
    pub size: i64,
    pub size_chunks: i64,
    pub completed_chunks: i64,
    /// Absolute path on disk, empty until the file is opened
    pub frozen_path: String,
    pub priority: i64,
    pub is_created: i64,
    pub is_open: i64,
}

type F = Field<File>;

impl Record for File {
    const KIND: EntityKind = EntityKind::File;

    const FIELDS: &'static [Field<Self>] = &[
        F::string("f.path=", |f, v| f.path = v),
        F::int("f.size_bytes=", |f, v| f.size = v),
        F::int("f.size_chunks=", |f, v| f.size_chunks = v),
        F::int("f.completed_chunks=", |f, v| f.completed_chunks = v),
        F::string("f.frozen_path=", |f, v| f.frozen_path = v),
        F::int("f.priority=", |f, v| f.priority = v),
        F::int("f.is_created=", |f, v| f.is_created = v),
        F::int("f.is_open=", |f, v| f.is_open = v),
    ];
}
