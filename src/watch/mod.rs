// src/watch/mod.rs

//! File watching and event classification.
//!
//! This module is responsible for:
//! - Resolving the watched source/output directories into a `WatchTarget`.
//! - Filtering paths by document extension and excluded output subtree.
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//!
//! It does **not** know about debouncing or the name index; it only turns
//! filesystem changes into document-level change/remove events.

pub mod classifier;
pub mod filter;
pub mod target;
pub mod watcher;

pub use classifier::{DocumentEvent, EventClassifier};
pub use filter::DocumentFilter;
pub use target::WatchTarget;
pub use watcher::{WatcherHandle, spawn_watcher};
