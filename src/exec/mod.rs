// src/exec/mod.rs

//! Renderer invocation layer.
//!
//! This module owns the external-process boundary: one generation pass is one
//! run of the configured renderer command over the whole source tree, using
//! `tokio::process::Command`. The interface is deliberately narrow (source,
//! output, width in; success/failure out) so the external renderer can later
//! be replaced with an in-process library call without touching the watcher
//! core.

pub mod command;

pub use command::{GenerateOutcome, GeneratorCommand};
