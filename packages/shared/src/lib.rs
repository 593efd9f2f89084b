//! Shared library for the arcterm client.
//!
//! Holds the wire-format types of the Raiders game API (request envelope,
//! state snapshot, per-view payloads, response envelopes) and the logging
//! bootstrap used by every binary.

// wire format
pub mod api;

// shared library
pub mod logger;
