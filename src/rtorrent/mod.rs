pub mod service;

#[cfg(test)]
pub mod mock;

pub use service::Rtorrent;
