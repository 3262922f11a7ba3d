//! Minimal XML-RPC codec and HTTP invoker

pub mod client;
pub mod encoder;
pub mod parser;
pub mod value;

pub use client::{Invoker, XmlRpcClient};
pub use value::Value;
