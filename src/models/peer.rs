use crate::catalog::EntityKind;
use crate::projection::{Field, Record};
use serde::{Deserialize, Serialize};

/// A peer connected for one torrent
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    /// Hex-encoded 20-byte peer id
    pub peer_id: String,
    pub address: String,
    pub port: i64,
    pub banned: i64,
    pub client_version: String,
    pub completed_percent: i64,
    pub is_encrypted: i64,
    pub is_incoming: i64,
    pub is_obfuscated: i64,
    /// Peer's own download rate as estimated from the pieces it announces
    pub peer_rate: i64,
    pub peer_total: i64,
    pub up_rate: i64,
    pub up_total: i64,
}

type F = Field<Peer>;

impl Record for Peer {
    const KIND: EntityKind = EntityKind::Peer;

    const FIELDS: &'static [Field<Self>] = &[
        F::string("p.id=", |p, v| p.peer_id = v),
        F::string("p.address=", |p, v| p.address = v),
        F::int("p.port=", |p, v| p.port = v),
        F::int("p.banned=", |p, v| p.banned = v),
        F::string("p.client_version=", |p, v| p.client_version = v),
        F::int("p.completed_percent=", |p, v| p.completed_percent = v),
        F::int("p.is_encrypted=", |p, v| p.is_encrypted = v),
        F::int("p.is_incoming=", |p, v| p.is_incoming = v),
        F::int("p.is_obfuscated=", |p, v| p.is_obfuscated = v),
        F::int("p.peer_rate=", |p, v| p.peer_rate = v),
        F::int("p.peer_total=", |p, v| p.peer_total = v),
        F::int("p.up_rate=", |p, v| p.up_rate = v),
        F::int("p.up_total=", |p, v| p.up_total = v),
    ];
}
