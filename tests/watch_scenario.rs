use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tempfile::tempdir;
use tokio::sync::mpsc;
use tokio::time::sleep;

use thumbwatch::engine::{Debouncer, Runtime, RuntimeEvent};
use thumbwatch::index::NameIndex;
use thumbwatch::watch::DocumentFilter;

type TestResult = Result<(), Box<dyn Error>>;

struct Harness {
    index: Arc<NameIndex>,
    runs: Arc<AtomicUsize>,
    events_tx: mpsc::Sender<RuntimeEvent>,
    runtime: tokio::task::JoinHandle<anyhow::Result<()>>,
}

/// Wire index + debouncer + runtime the way `run()` does, with a counter in
/// place of the external renderer.
fn harness(root: PathBuf, debounce_ms: u64) -> Harness {
    let filter = DocumentFilter::new("pdf", None).unwrap();
    let index = Arc::new(NameIndex::new(root, filter));
    let runs = Arc::new(AtomicUsize::new(0));

    let debouncer = Debouncer::spawn(Duration::from_millis(debounce_ms), {
        let index = Arc::clone(&index);
        let runs = Arc::clone(&runs);
        move || {
            let index = Arc::clone(&index);
            let runs = Arc::clone(&runs);
            async move {
                index.update()?;
                runs.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }
    });

    let (events_tx, events_rx) = mpsc::channel(64);
    let runtime = tokio::spawn(Runtime::new(Arc::clone(&index), debouncer, events_rx).run());

    Harness {
        index,
        runs,
        events_tx,
        runtime,
    }
}

async fn wait_until(limit_ms: u64, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(limit_ms);
    loop {
        if cond() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        sleep(Duration::from_millis(20)).await;
    }
}

#[tokio::test]
async fn removal_refreshes_the_index_without_waiting_for_the_debounce() -> TestResult {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.pdf"), b"x")?;
    fs::write(dir.path().join("b.pdf"), b"x")?;

    // A one-minute debounce: only the synchronous removal path can touch the
    // index within this test's lifetime.
    let h = harness(dir.path().to_path_buf(), 60_000);

    fs::remove_file(dir.path().join("a.pdf"))?;
    h.events_tx
        .send(RuntimeEvent::DocumentRemoved(dir.path().join("a.pdf")))
        .await?;

    let index_path = h.index.path();
    assert!(
        wait_until(2_000, || {
            fs::read_to_string(&index_path).is_ok_and(|c| c == "b.pdf\n")
        })
        .await,
        "index was not refreshed synchronously on removal"
    );
    assert_eq!(h.runs.load(Ordering::SeqCst), 0);

    h.events_tx.send(RuntimeEvent::ShutdownRequested).await?;
    h.runtime.await??;
    Ok(())
}

#[tokio::test]
async fn delete_then_create_burst_yields_one_pass_and_a_current_index() -> TestResult {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.pdf"), b"x")?;
    fs::write(dir.path().join("b.pdf"), b"x")?;

    let h = harness(dir.path().to_path_buf(), 300);
    let index_path = h.index.path();

    // Delete a.pdf, then create c.pdf well inside the debounce window.
    fs::remove_file(dir.path().join("a.pdf"))?;
    h.events_tx
        .send(RuntimeEvent::DocumentRemoved(dir.path().join("a.pdf")))
        .await?;

    assert!(
        wait_until(2_000, || {
            fs::read_to_string(&index_path).is_ok_and(|c| c == "b.pdf\n")
        })
        .await,
        "deletion must reach the index before the debounced pass"
    );

    fs::write(dir.path().join("c.pdf"), b"x")?;
    h.events_tx
        .send(RuntimeEvent::DocumentChanged(dir.path().join("c.pdf")))
        .await?;

    // After the quiet period: exactly one composite run, index fully current.
    assert!(
        wait_until(3_000, || h.runs.load(Ordering::SeqCst) == 1).await,
        "expected exactly one debounced pass"
    );
    sleep(Duration::from_millis(500)).await;
    assert_eq!(h.runs.load(Ordering::SeqCst), 1);
    assert_eq!(fs::read_to_string(&index_path)?, "b.pdf\nc.pdf\n");

    h.events_tx.send(RuntimeEvent::ShutdownRequested).await?;
    h.runtime.await??;
    Ok(())
}

#[tokio::test]
async fn changes_schedule_a_single_pass_per_burst() -> TestResult {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.pdf"), b"x")?;

    let h = harness(dir.path().to_path_buf(), 200);

    for _ in 0..4 {
        h.events_tx
            .send(RuntimeEvent::DocumentChanged(dir.path().join("a.pdf")))
            .await?;
        sleep(Duration::from_millis(40)).await;
    }

    assert!(
        wait_until(3_000, || h.runs.load(Ordering::SeqCst) == 1).await,
        "burst of changes must collapse into one pass"
    );
    sleep(Duration::from_millis(400)).await;
    assert_eq!(h.runs.load(Ordering::SeqCst), 1);
    assert_eq!(fs::read_to_string(h.index.path())?, "a.pdf\n");

    h.events_tx.send(RuntimeEvent::ShutdownRequested).await?;
    h.runtime.await??;
    Ok(())
}

#[tokio::test]
async fn shutdown_stops_the_runtime_without_draining() -> TestResult {
    let dir = tempdir()?;
    let h = harness(dir.path().to_path_buf(), 60_000);

    h.events_tx
        .send(RuntimeEvent::DocumentChanged(dir.path().join("a.pdf")))
        .await?;
    h.events_tx.send(RuntimeEvent::ShutdownRequested).await?;

    h.runtime.await??;
    assert_eq!(h.runs.load(Ordering::SeqCst), 0);
    Ok(())
}
