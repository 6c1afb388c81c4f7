//! External data sources.
//!
//! Flare rows come from an external query program run off the UI thread;
//! the event loop receives its single completion over a channel.

pub mod query;

pub use query::{parse_query_output, QueryCompletion, QueryOutput, QueryRequest, QueryRunner};
