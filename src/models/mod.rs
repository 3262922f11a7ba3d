pub mod file;
pub mod peer;
pub mod query;
pub mod response;
pub mod system;
pub mod torrent;
pub mod tracker;

pub use file::File;
pub use peer::Peer;
pub use system::SystemSnapshot;
pub use torrent::Torrent;
pub use tracker::Tracker;
