use crate::catalog::EntityKind;
use crate::projection::{Field, Record};
use serde::{Deserialize, Serialize};

/// A tracker attached to one torrent
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub tracker_id: String,
    pub activity_time_last: i64,
    pub activity_time_next: i64,
    pub can_scrape: i64,
    pub is_usable: i64,
    pub is_enabled: i64,
    pub failed_counter: i64,
    pub failed_time_last: i64,
    pub failed_time_next: i64,
    pub is_busy: i64,
    pub is_open: i64,
    /// 1 = http, 2 = udp, 3 = dht
    #[serde(rename = "type")]
    pub tracker_type: i64,
    pub url: String,
}

type F = Field<Tracker>;

impl Record for Tracker {
    const KIND: EntityKind = EntityKind::Tracker;

    const FIELDS: &'static [Field<Self>] = &[
        F::string("t.id=", |t, v| t.tracker_id = v),
        F::int("t.activity_time_last=", |t, v| t.activity_time_last = v),
        F::int("t.activity_time_next=", |t, v| t.activity_time_next = v),
        F::int("t.can_scrape=", |t, v| t.can_scrape = v),
        F::int("t.is_usable=", |t, v| t.is_usable = v),
        F::int("t.is_enabled=", |t, v| t.is_enabled = v),
        F::int("t.failed_counter=", |t, v| t.failed_counter = v),
        F::int("t.failed_time_last=", |t, v| t.failed_time_last = v),
        F::int("t.failed_time_next=", |t, v| t.failed_time_next = v),
        F::int("t.is_busy=", |t, v| t.is_busy = v),
        F::int("t.is_open=", |t, v| t.is_open = v),
        F::int("t.type=", |t, v| t.tracker_type = v),
        F::string("t.url=", |t, v| t.url = v),
    ];
}
