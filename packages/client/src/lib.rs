//! Terminal client for the Raiders raid game.
//!
//! The client is a single session controller: it acquires and persists the
//! auth credential, keeps per-view pagination/selection state, issues one
//! request per user command against the game's JSON HTTP API, and re-renders
//! the affected view fragment from each response. All game logic is
//! server-side; nothing here computes prices, eligibility or combat.

pub mod api;
pub mod command;
pub mod controller;
pub mod error;
pub mod formatter;
pub mod phase;
pub mod runner;
pub mod state;
pub mod store;
pub mod transport;
pub mod ui;

pub use runner::{RunOptions, run_client};
