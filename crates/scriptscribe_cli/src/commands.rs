// SPDX-License-Identifier: MIT OR Apache-2.0
//! CLI commands: one-shot batch export and watch mode.
//!
//! Watch mode bridges debounced filesystem events into the export engine's
//! notification hub; a change monitor then re-exports whichever asset was
//! added or modified.

use anyhow::Context;
use notify_debouncer_full::{
    new_debouncer,
    notify::{self, RecursiveMode},
    DebounceEventResult,
};
use parking_lot::Mutex;
use scriptscribe_export::{
    AssetRepository, ChangeEvent, ChangeEventClass, ChangeMonitor, Exporter, FsAssetRepository,
    FsPersistence, NotificationHub,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Debounce window for filesystem events
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Export every script asset under `assets` to `out`.
pub fn run_export(assets: &Path, out: &Path) -> anyhow::Result<()> {
    let repository = FsAssetRepository::open(assets);
    let exporter = Exporter::new(repository, FsPersistence);
    exporter.export_all(out);
    Ok(())
}

/// Export everything once, then re-export assets as their files change.
///
/// Runs until the process is interrupted.
pub fn run_watch(assets: &Path, out: &Path) -> anyhow::Result<()> {
    let repository = Arc::new(FsAssetRepository::open(assets));
    let exporter = Exporter::new(Arc::clone(&repository), FsPersistence);
    exporter.export_all(out);

    let hub = Arc::new(Mutex::new(NotificationHub::new()));
    let mut monitor = ChangeMonitor::new(
        Arc::clone(&hub),
        Arc::clone(&repository) as Arc<dyn AssetRepository + Send + Sync>,
    );

    let out_dir = out.to_path_buf();
    monitor.start_monitoring(Box::new(move |asset| {
        let path = out_dir.join(format!("{}.json", asset.name));
        if let Err(error) = exporter.write_document(asset, &path) {
            tracing::error!(asset = %asset.name, "re-export failed: {error}");
        }
    }));

    let events_hub = Arc::clone(&hub);
    let mut debouncer = new_debouncer(DEBOUNCE, None, move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                for event in events {
                    let Some(class) = event_class(&event.kind) else {
                        continue;
                    };
                    for path in &event.paths {
                        // Only `.scriptasset` files become change events;
                        // removal events are forwarded but not relayed.
                        if let Some(handle) = FsAssetRepository::handle_for(path) {
                            events_hub.lock().emit(&ChangeEvent { class, handle });
                        }
                    }
                }
            }
            Err(errors) => {
                for error in errors {
                    tracing::warn!("file watcher error: {error}");
                }
            }
        }
    })
    .context("failed to create file watcher")?;

    debouncer
        .watch(assets, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", assets.display()))?;
    tracing::info!("watching {} for script asset changes", assets.display());

    loop {
        std::thread::sleep(Duration::from_secs(1));
    }
}

fn event_class(kind: &notify::EventKind) -> Option<ChangeEventClass> {
    use notify::EventKind;
    match kind {
        EventKind::Create(_) => Some(ChangeEventClass::Added),
        EventKind::Modify(_) => Some(ChangeEventClass::Modified),
        EventKind::Remove(_) => Some(ChangeEventClass::Removed),
        EventKind::Any | EventKind::Access(_) | EventKind::Other => None,
    }
}
