// Application state (AppState)

use crate::core::config::Config;
use crate::rtorrent::Rtorrent;
use std::sync::Arc;

/// Shared application state
///
/// Cloned into every request handler; both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// rTorrent operations over the shared RPC client
    pub rtorrent: Arc<Rtorrent>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, rtorrent: Rtorrent) -> Self {
        Self {
            rtorrent: Arc::new(rtorrent),
            config: Arc::new(config),
        }
    }
}
