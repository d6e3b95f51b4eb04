// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod exec;
pub mod index;
pub mod logging;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::cli::CliArgs;
use crate::config::{Settings, load_optional, validate_settings};
use crate::engine::{Debouncer, Runtime, RuntimeEvent};
use crate::exec::{GenerateOutcome, GeneratorCommand};
use crate::index::NameIndex;
use crate::watch::{DocumentFilter, EventClassifier, WatchTarget};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + CLI merge
/// - watch target / filter / name index
/// - debounce scheduler bound to the composite regeneration action
/// - file watcher
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let file = load_optional(args.config.as_deref())?;
    let settings = Settings::resolve(&args, file)?;
    validate_settings(&settings)?;

    if args.dry_run {
        print_dry_run(&settings);
        return Ok(());
    }

    // Missing source root is a configuration fault; diagnosed, watch never starts.
    let target = WatchTarget::resolve(&settings)?;
    let filter = DocumentFilter::new(&settings.extension, target.excluded_output())?;
    let index = Arc::new(NameIndex::new(target.source_root.clone(), filter.clone()));

    let pipeline = Arc::new(RegenPipeline {
        index: Arc::clone(&index),
        generator: GeneratorCommand::parse(&settings.command)?,
        source: target.source_root.clone(),
        out: target.output_root.clone(),
        size: settings.size,
    });

    if settings.initial_pass {
        info!("running initial generation pass");
        if let Err(err) = pipeline.run_once().await {
            error!(error = %err, "initial generation pass failed");
        }
    }

    if args.once {
        return Ok(());
    }

    // The composite debounced action: index update, then generation, so a
    // renderer that reads the index sees current names.
    let debouncer = Debouncer::spawn(settings.debounce_delay(), {
        let pipeline = Arc::clone(&pipeline);
        move || {
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.run_once().await }
        }
    });

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let classifier = EventClassifier::new(filter);
    let _watcher_handle = watch::spawn_watcher(&target, classifier, rt_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let runtime = Runtime::new(index, debouncer, rt_rx);
    runtime.run().await
}

/// One full regeneration pass: refresh the name index, then invoke the
/// renderer over the whole source tree.
struct RegenPipeline {
    index: Arc<NameIndex>,
    generator: GeneratorCommand,
    source: PathBuf,
    out: PathBuf,
    size: u32,
}

impl RegenPipeline {
    async fn run_once(&self) -> Result<()> {
        self.index.update()?;

        // A failed render is logged, never escalated; re-invocation over an
        // unchanged tree is cheap since the renderer skips existing artifacts.
        match self.generator.run(&self.source, &self.out, self.size).await? {
            GenerateOutcome::Success => {}
            GenerateOutcome::Failed(code) => {
                warn!(exit_code = code, "generation pass failed");
            }
        }

        Ok(())
    }
}

/// Simple dry-run output: print the effective settings and exit.
fn print_dry_run(settings: &Settings) {
    println!("thumbwatch dry-run");
    println!("  source = {:?}", settings.source);
    println!("  out = {:?}", settings.out);
    println!("  size = {}", settings.size);
    println!("  debounce_secs = {}", settings.debounce_secs);
    println!("  extension = {}", settings.extension);
    println!("  recursive = {}", settings.recursive);
    println!("  initial_pass = {}", settings.initial_pass);
    println!("  command = {}", settings.command);
}
