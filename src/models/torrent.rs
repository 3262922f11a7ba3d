use crate::catalog::EntityKind;
use crate::projection::{Field, Record};
use serde::{Deserialize, Serialize};

/// A download as listed in an rTorrent view
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Torrent {
    /// Info hash, 40 uppercase hex characters
    pub hash: String,
    pub name: String,
    pub size_bytes: i64,
    pub completed_bytes: i64,
    /// Bytes per second
    pub upload_rate: i64,
    pub upload_total: i64,
    /// Bytes per second
    pub download_rate: i64,
    pub download_total: i64,
    /// Last tracker or storage message, empty when healthy
    pub message: String,
    pub is_active: i64,
    pub is_open: i64,
    pub is_hashing: i64,
    pub leechers: i64,
    pub seeders: i64,
    /// 0 = stopped, 1 = started
    pub state: i64,
    /// Unix timestamp of the last state change
    pub state_changed: i64,
    pub state_counter: i64,
    /// 0 = off, 1 = low, 2 = normal, 3 = high
    pub priority: i64,
    pub custom1: String,
    pub custom2: String,
    pub custom3: String,
    pub custom4: String,
    pub custom5: String,
}

type F = Field<Torrent>;

impl Record for Torrent {
    const KIND: EntityKind = EntityKind::Torrent;

    const FIELDS: &'static [Field<Self>] = &[
        F::string("d.hash=", |t, v| t.hash = v),
        F::string("d.name=", |t, v| t.name = v),
        F::int("d.size_bytes=", |t, v| t.size_bytes = v),
        F::int("d.completed_bytes=", |t, v| t.completed_bytes = v),
        F::int("d.up.rate=", |t, v| t.upload_rate = v),
        F::int("d.up.total=", |t, v| t.upload_total = v),
        F::int("d.down.rate=", |t, v| t.download_rate = v),
        F::int("d.down.total=", |t, v| t.download_total = v),
        F::string("d.message=", |t, v| t.message = v),
        F::int("d.is_active=", |t, v| t.is_active = v),
        F::int("d.is_open=", |t, v| t.is_open = v),
        F::int("d.is_hash_checking=", |t, v| t.is_hashing = v),
        F::int("d.peers_accounted=", |t, v| t.leechers = v),
        F::int("d.peers_complete=", |t, v| t.seeders = v),
        F::int("d.state=", |t, v| t.state = v),
        F::int("d.state_changed=", |t, v| t.state_changed = v),
        F::int("d.state_counter=", |t, v| t.state_counter = v),
        F::int("d.priority=", |t, v| t.priority = v),
        F::string("d.custom1=", |t, v| t.custom1 = v),
        F::string("d.custom2=", |t, v| t.custom2 = v),
        F::string("d.custom3=", |t, v| t.custom3 = v),
        F::string("d.custom4=", |t, v| t.custom4 = v),
        F::string("d.custom5=", |t, v| t.custom5 = v),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let torrent = Torrent {
            hash: "ABC123".to_string(),
            leechers: 2,
            seeders: 7,
            is_hashing: 1,
            ..Default::default()
        };

        let json = serde_json::to_value(&torrent).unwrap();
        assert_eq!(json["hash"], "ABC123");
        assert_eq!(json["leechers"], 2);
        assert_eq!(json["seeders"], 7);
        assert_eq!(json["is_hashing"], 1);
        assert_eq!(json["custom5"], "");
    }
}
