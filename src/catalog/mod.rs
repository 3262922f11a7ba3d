//! Selector catalog
//!
//! The one place where every recognised remote attribute is listed. Record
//! descriptor tables in `models` must stay in step with these lists; the tests
//! below hold them together.

pub mod selectors;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Torrent,
    File,
    Peer,
    Tracker,
    System,
}

impl EntityKind {
    /// Remote method that fetches rows of this kind
    pub fn multicall_method(self) -> &'static str {
        match self {
            EntityKind::Torrent => "d.multicall2",
            EntityKind::File => "f.multicall",
            EntityKind::Peer => "p.multicall",
            EntityKind::Tracker => "t.multicall",
            EntityKind::System => "system.multicall",
        }
    }

    /// Selector namespace, e.g. `d` in `d.hash=`
    pub fn namespace(self) -> &'static str {
        match self {
            EntityKind::Torrent => "d",
            EntityKind::File => "f",
            EntityKind::Peer => "p",
            EntityKind::Tracker => "t",
            EntityKind::System => "system",
        }
    }

    /// Appended to attribute names to form a selector
    pub fn selector_suffix(self) -> &'static str {
        match self {
            EntityKind::System => "",
            _ => "=",
        }
    }

    pub fn default_selectors(self) -> &'static [&'static str] {
        match self {
            EntityKind::Torrent => selectors::TORRENT_SELECTORS,
            EntityKind::File => selectors::FILE_SELECTORS,
            EntityKind::Peer => selectors::PEER_SELECTORS,
            EntityKind::Tracker => selectors::TRACKER_SELECTORS,
            EntityKind::System => selectors::SYSTEM_CALLS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Torrent => "torrent",
            EntityKind::File => "file",
            EntityKind::Peer => "peer",
            EntityKind::Tracker => "tracker",
            EntityKind::System => "system",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{File, Peer, SystemSnapshot, Torrent, Tracker};
    use crate::projection::Record;
    use std::collections::HashSet;

    fn assert_catalog_consistent<T: Record>() {
        let kind = T::KIND;
        let tags: Vec<&str> = T::FIELDS.iter().map(|field| field.tag).collect();

        let unique: HashSet<&str> = tags.iter().copied().collect();
        assert_eq!(unique.len(), tags.len(), "duplicate tag in {} fields", kind);

        let defaults = kind.default_selectors();
        let unique_defaults: HashSet<&str> = defaults.iter().copied().collect();
        assert_eq!(unique_defaults.len(), defaults.len(), "duplicate default selector for {}", kind);

        for selector in defaults {
            assert!(
                T::field(selector).is_some(),
                "default selector {} has no {} field",
                selector,
                kind
            );
        }

        for tag in &tags {
            assert!(
                unique_defaults.contains(tag),
                "{} field tag {} missing from default selectors",
                kind,
                tag
            );
        }
    }

    #[test]
    fn test_torrent_catalog() {
        assert_catalog_consistent::<Torrent>();
        assert_eq!(Torrent::KIND, EntityKind::Torrent);
    }

    #[test]
    fn test_file_catalog() {
        assert_catalog_consistent::<File>();
        assert_eq!(File::KIND, EntityKind::File);
    }

    #[test]
    fn test_peer_catalog() {
        assert_catalog_consistent::<Peer>();
        assert_eq!(Peer::KIND, EntityKind::Peer);
    }

    #[test]
    fn test_tracker_catalog() {
        assert_catalog_consistent::<Tracker>();
        assert_eq!(Tracker::KIND, EntityKind::Tracker);
    }

    #[test]
    fn test_system_catalog() {
        assert_catalog_consistent::<SystemSnapshot>();
        assert_eq!(SystemSnapshot::KIND, EntityKind::System);
    }

    #[test]
    fn test_selector_grammar() {
        for kind in [
            EntityKind::Torrent,
            EntityKind::File,
            EntityKind::Peer,
            EntityKind::Tracker,
        ] {
            let prefix = format!("{}.", kind.namespace());
            for selector in kind.default_selectors() {
                assert!(selector.starts_with(&prefix), "{} lacks prefix {}", selector, prefix);
                assert!(selector.ends_with('='), "{} lacks suffix", selector);
            }
        }

        for call in EntityKind::System.default_selectors() {
            assert!(!call.ends_with('='), "{} must be a bare method name", call);
        }
    }

    #[test]
    fn test_multicall_methods() {
        assert_eq!(EntityKind::Torrent.multicall_method(), "d.multicall2");
        assert_eq!(EntityKind::File.multicall_method(), "f.multicall");
        assert_eq!(EntityKind::Peer.multicall_method(), "p.multicall");
        assert_eq!(EntityKind::Tracker.multicall_method(), "t.multicall");
        assert_eq!(EntityKind::System.multicall_method(), "system.multicall");
    }
}
