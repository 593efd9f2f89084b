//! Wire-format types for the Raiders game API.
//!
//! Types are organized by direction:
//! - `envelope`: the shared request envelope and per-endpoint request bodies
//! - `snapshot`: the aggregate state snapshot pushed by the server
//! - `views`: per-view payloads (storage, sell, market, shop, ...)
//! - `replies`: response envelopes wrapping `ok`/`message` plus a payload key

pub mod envelope;
pub mod replies;
pub mod snapshot;
pub mod views;
