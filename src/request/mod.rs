pub mod builder;

pub use builder::{parse_selector_override, MulticallRequest, SystemRequest};
