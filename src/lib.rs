pub mod catalog;
pub mod core;
pub mod handlers;
pub mod models;
pub mod projection;
pub mod request;
pub mod rtorrent;
pub mod xmlrpc;
