//! Projection of untyped RPC result rows onto typed records
//!
//! Two variants share the per-type descriptor tables from [`Record`]:
//! positional (multicall rows keyed by the selector list that was sent) and
//! method-keyed (one value per named call in a batch).

pub mod field;
pub mod method_keyed;
pub mod positional;

pub use field::{Field, Record, Setter};
pub use method_keyed::project_calls;
pub use positional::project_rows;
