// src/engine/mod.rs

//! Orchestration engine for thumbwatch.
//!
//! This module ties together:
//! - the debounce scheduler that coalesces bursts of change events into one
//!   regeneration pass
//! - the main runtime event loop that reacts to:
//!   - document change events
//!   - document removal events (which refresh the name index immediately)
//!   - shutdown signals

pub mod debounce;
pub mod runtime;

pub use debounce::Debouncer;
pub use runtime::{Runtime, RuntimeEvent};
