// src/watch/watcher.rs

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::watch::classifier::{DocumentEvent, EventClassifier};
use crate::watch::target::WatchTarget;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher observing the target's source root and sending
/// classified [`RuntimeEvent`]s into the runtime.
///
/// notify delivers events on its own thread; they are forwarded over an
/// unbounded channel into an async task that classifies them, so the delivery
/// callback never blocks.
pub fn spawn_watcher(
    target: &WatchTarget,
    classifier: EventClassifier,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = target.source_root.clone();

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if let Err(err) = event_tx.send(event) {
                        // We can't log via tracing here easily, so fallback to stderr.
                        eprintln!("thumbwatch: failed to forward notify event: {err}");
                    }
                }
                Err(err) => {
                    eprintln!("thumbwatch: file watch error: {err}");
                }
            }
        },
        Config::default(),
    )?;

    let mode = if target.recursive {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };
    watcher.watch(&root, mode)?;

    info!("file watcher started on {:?}", root);

    // Async task that consumes notify events and forwards classified document
    // events to the runtime.
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!("received notify event: {:?}", event);

            for action in classifier.classify(&event) {
                let runtime_event = match action {
                    DocumentEvent::Changed(path) => RuntimeEvent::DocumentChanged(path),
                    DocumentEvent::Removed(path) => RuntimeEvent::DocumentRemoved(path),
                };
                if let Err(err) = runtime_tx.send(runtime_event).await {
                    warn!("failed to send runtime event: {err}");
                    // If the runtime channel is closed, there's no point
                    // keeping the watcher loop alive.
                    return;
                }
            }
        }

        debug!("file watcher loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}
