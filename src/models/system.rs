use crate::catalog::EntityKind;
use crate::projection::{Field, Record};
use serde::{Deserialize, Serialize};

/// Global daemon state, fetched with one batch of named calls
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub hostname: String,
    pub pid: i64,
    /// Daemon clock, Unix seconds
    pub time_seconds: i64,
    pub api_version: String,
    pub client_version: String,
    pub library_version: String,
    pub down_total: i64,
    pub up_total: i64,
    pub down_rate: i64,
    pub up_rate: i64,
    /// 0 means unlimited
    pub down_max_rate: i64,
    pub up_max_rate: i64,
}

type F = Field<SystemSnapshot>;

impl Record for SystemSnapshot {
    const KIND: EntityKind = EntityKind::System;

    const FIELDS: &'static [Field<Self>] = &[
        F::string("system.hostname", |s, v| s.hostname = v),
        F::int("system.pid", |s, v| s.pid = v),
        F::int("system.time_seconds", |s, v| s.time_seconds = v),
        F::string("system.api_version", |s, v| s.api_version = v),
        F::string("system.client_version", |s, v| s.client_version = v),
        F::string("system.library_version", |s, v| s.library_version = v),
        F::int("throttle.global_down.total", |s, v| s.down_total = v),
        F::int("throttle.global_up.total", |s, v| s.up_total = v),
        F::int("throttle.global_down.rate", |s, v| s.down_rate = v),
        F::int("throttle.global_up.rate", |s, v| s.up_rate = v),
        F::int("throttle.global_down.max_rate", |s, v| s.down_max_rate = v),
        F::int("throttle.global_up.max_rate", |s, v| s.up_max_rate = v),
    ];
}
