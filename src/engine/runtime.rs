// src/engine/runtime.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::debounce::Debouncer;
use crate::index::NameIndex;

/// Events sent into the runtime from the watcher or external signals.
///
/// The idea is that:
/// - the watcher sends `DocumentChanged` / `DocumentRemoved`
/// - Ctrl-C handling sends `ShutdownRequested`
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    DocumentChanged(PathBuf),
    DocumentRemoved(PathBuf),
    ShutdownRequested,
}

/// The main orchestration runtime.
///
/// Responsibilities:
/// - Consume [`RuntimeEvent`]s from the watcher and signal handler.
/// - Refresh the name index synchronously when a document is removed, so a
///   deletion is visible in the index even while the regeneration pass is
///   still pending (or later fails).
/// - Schedule debounced regeneration passes for every relevant change.
pub struct Runtime {
    index: Arc<NameIndex>,
    debouncer: Debouncer,

    /// Unified event stream from all producers (watcher, signal handler).
    events_rx: mpsc::Receiver<RuntimeEvent>,
}

impl Runtime {
    pub fn new(
        index: Arc<NameIndex>,
        debouncer: Debouncer,
        events_rx: mpsc::Receiver<RuntimeEvent>,
    ) -> Self {
        Self {
            index,
            debouncer,
            events_rx,
        }
    }

    /// Main event loop.
    ///
    /// Returns when a shutdown is requested or every sender has been dropped.
    /// A regeneration pass still pending in the debouncer at that point is
    /// abandoned, not drained.
    pub async fn run(mut self) -> Result<()> {
        info!("thumbwatch runtime started");

        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::DocumentChanged(path) => {
                    info!(path = ?path, "document changed");
                    self.debouncer.schedule();
                }
                RuntimeEvent::DocumentRemoved(path) => {
                    info!(path = ?path, "document removed");
                    // Index update happens before the schedule call; further
                    // removals each re-trigger it, so the index always
                    // reflects the latest deletion seen.
                    if let Err(err) = self.index.update() {
                        warn!(error = %err, "name index update after removal failed");
                    }
                    self.debouncer.schedule();
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested, stopping runtime");
                    break;
                }
            }
        }

        info!("thumbwatch runtime exiting");
        Ok(())
    }
}
