pub mod fallback;
pub mod health;
pub mod load;
pub mod methods;
pub mod system;
pub mod torrent;
pub mod view;
