//! Runtime data types
//!
//! - `Value`: any value a rule can read or write
//! - `Record`: one flat input row

pub mod record;
pub mod value;

pub use record::{record_from_pairs, Record};
pub use value::Value;
