//! flarecat
//!
//! Terminal browser for curating a cache of SDO/AIA solar flare events:
//! edit the query settings, run the external flare query, pick rows into a
//! local TSV cache, and view or prune that cache.
//!
//! The state machine in [`state`] is pure; [`view`] is the impure shell that
//! owns the terminal, the event loop, and the query worker.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod store;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;
