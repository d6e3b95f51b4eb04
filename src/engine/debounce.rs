// src/engine/debounce.rs

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, error};

/// Coalesces bursts of [`schedule`](Debouncer::schedule) calls into a single
/// run of the bound action.
///
/// A single coordinating task owns the deadline: each incoming schedule
/// request pushes it out by the full delay, and the action fires once the
/// delay elapses with no further requests. There is at most one pending
/// deadline at any instant, and runs never overlap: the task awaits the
/// action before reading further requests, so triggers arriving mid-run are
/// buffered and open a fresh quiet period afterwards.
///
/// Action faults (errors and panics alike) are caught, logged, and swallowed;
/// the scheduler stays armed for future triggers.
#[derive(Debug, Clone)]
pub struct Debouncer {
    tx: mpsc::Sender<()>,
}

impl Debouncer {
    /// Spawn the coordinating task with the given quiet period and action.
    pub fn spawn<F, Fut>(delay: Duration, mut action: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<()>(16);

        tokio::spawn(async move {
            let mut deadline: Option<Instant> = None;

            loop {
                match deadline {
                    None => match rx.recv().await {
                        Some(()) => deadline = Some(Instant::now() + delay),
                        None => break,
                    },
                    Some(when) => {
                        tokio::select! {
                            msg = rx.recv() => match msg {
                                Some(()) => deadline = Some(Instant::now() + delay),
                                None => break,
                            },
                            _ = time::sleep_until(when) => {
                                deadline = None;
                                run_contained(action()).await;
                            }
                        }
                    }
                }
            }

            debug!("debounce loop ended (channel closed)");
        });

        Self { tx }
    }

    /// Request a run "soon". Never blocks the caller.
    pub fn schedule(&self) {
        // A full channel means a trigger is already buffered, so the dropped
        // message cannot lose a run.
        let _ = self.tx.try_send(());
    }
}

/// Run one action to completion, containing both errors and panics.
///
/// The extra `tokio::spawn` turns a panic inside the action into a
/// `JoinError` instead of taking down the debounce loop.
async fn run_contained(fut: impl Future<Output = Result<()>> + Send + 'static) {
    match tokio::spawn(fut).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => error!(error = %err, "debounced run failed"),
        Err(err) => error!(error = %err, "debounced run panicked"),
    }
}
