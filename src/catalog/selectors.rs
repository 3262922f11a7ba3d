// Canonical selector order per entity kind. The order here is the order of
// values in every result row, so it is sent verbatim.

pub const TORRENT_SELECTORS: &[&str] = &[
    "d.hash=",
    "d.name=",
    "d.size_bytes=",
    "d.completed_bytes=",
    "d.up.rate=",
    "d.up.total=",
    "d.down.rate=",
    "d.down.total=",
    "d.message=",
    "d.is_active=",
    "d.is_open=",
    "d.is_hash_checking=",
    "d.peers_accounted=",
    "d.peers_complete=",
    "d.state=",
    "d.state_changed=",
    "d.state_counter=",
    "d.priority=",
    "d.custom1=",
    "d.custom2=",
    "d.custom3=",
    "d.custom4=",
    "d.custom5=",
];

pub const FILE_SELECTORS: &[&str] = &[
    "f.path=",
    "f.size_bytes=",
    "f.size_chunks=",
    "f.completed_chunks=",
    "f.frozen_path=",
    "f.priority=",
    "f.is_created=",
    "f.is_open=",
];

pub const PEER_SELECTORS: &[&str] = &[
    "p.id=",
    "p.address=",
    "p.port=",
    "p.banned=",
    "p.client_version=",
    "p.completed_percent=",
    "p.is_encrypted=",
    "p.is_incoming=",
    "p.is_obfuscated=",
    "p.peer_rate=",
    "p.peer_total=",
    "p.up_rate=",
    "p.up_total=",
];

pub const TRACKER_SELECTORS: &[&str] = &[
    "t.id=",
    "t.type=",
    "t.url=",
    "t.activity_time_last=",
    "t.activity_time_next=",
    "t.can_scrape=",
    "t.is_usable=",
    "t.is_enabled=",
    "t.failed_counter=",
    "t.failed_time_last=",
    "t.failed_time_next=",
    "t.is_busy=",
    "t.is_open=",
];

/// Named calls batched into one `system.multicall`
pub const SYSTEM_CALLS: &[&str] = &[
    "system.hostname",
    "system.pid",
    "system.time_seconds",
    "system.api_version",
    "system.client_version",
    "system.library_version",
    "throttle.global_down.total",
    "throttle.global_up.total",
    "throttle.global_down.rate",
    "throttle.global_up.rate",
    "throttle.global_down.max_rate",
    "throttle.global_up.max_rate",
];
