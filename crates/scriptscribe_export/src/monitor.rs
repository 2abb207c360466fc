// SPDX-License-Identifier: MIT OR Apache-2.0
//! Change monitoring for script assets.
//!
//! The monitor is a small two-state machine (`Idle` / `Monitoring`) that
//! registers handlers against an injected change-notification source and
//! relays added/modified events for the watched asset kind to one stored
//! callback. It buffers nothing and imposes no ordering of its own; the
//! callback runs synchronously inside the source's dispatch.

use crate::repository::{AssetHandle, AssetKind, AssetRepository};
use parking_lot::Mutex;
use scriptscribe_graph::ScriptAsset;
use std::sync::Arc;

/// Classes of change events delivered by a notification source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeEventClass {
    /// An asset appeared
    Added,
    /// An asset disappeared
    Removed,
    /// An asset's contents changed
    Modified,
}

/// A single change notification
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// Event class
    pub class: ChangeEventClass,
    /// The asset the event is about
    pub handle: AssetHandle,
}

/// Identifier for one registered handler
pub type SubscriptionId = u64;

/// Handler registered against a notification source
pub type ChangeHandler = Box<dyn FnMut(&ChangeEvent) + Send>;

/// Callback invoked with a changed asset
pub type AssetChangedCallback = Box<dyn FnMut(&ScriptAsset) + Send>;

/// Source of asset change notifications
pub trait ChangeNotificationSource {
    /// Register `handler` for one event class.
    fn subscribe(&mut self, class: ChangeEventClass, handler: ChangeHandler) -> SubscriptionId;

    /// Remove a previously registered handler. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// In-process change-notification source.
///
/// Dispatch is synchronous, in subscription order, within the caller of
/// [`NotificationHub::emit`].
#[derive(Default)]
pub struct NotificationHub {
    handlers: Vec<(SubscriptionId, ChangeEventClass, ChangeHandler)>,
    next_id: SubscriptionId,
}

impl NotificationHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatch `event` to every handler subscribed to its class.
    pub fn emit(&mut self, event: &ChangeEvent) {
        for (_, class, handler) in &mut self.handlers {
            if *class == event.class {
                handler(event);
            }
        }
    }
}

impl ChangeNotificationSource for NotificationHub {
    fn subscribe(&mut self, class: ChangeEventClass, handler: ChangeHandler) -> SubscriptionId {
        self.next_id += 1;
        self.handlers.push((self.next_id, class, handler));
        self.next_id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.handlers.retain(|(handler_id, _, _)| *handler_id != id);
    }
}

/// Monitors a notification source and re-dispatches changes of script
/// assets to one stored callback.
///
/// `start_monitoring` while already monitoring replaces the callback
/// without touching the subscriptions; `stop_monitoring` while idle is a
/// no-op. Removal events are observed but deliberately not relayed.
pub struct ChangeMonitor<S: ChangeNotificationSource> {
    source: Arc<Mutex<S>>,
    repository: Arc<dyn AssetRepository + Send + Sync>,
    watched_kind: AssetKind,
    callback: Arc<Mutex<Option<AssetChangedCallback>>>,
    subscriptions: Vec<SubscriptionId>,
}

impl<S: ChangeNotificationSource> ChangeMonitor<S> {
    /// Create an idle monitor watching script assets.
    pub fn new(
        source: Arc<Mutex<S>>,
        repository: Arc<dyn AssetRepository + Send + Sync>,
    ) -> Self {
        Self {
            source,
            repository,
            watched_kind: AssetKind::ScriptAsset,
            callback: Arc::new(Mutex::new(None)),
            subscriptions: Vec::new(),
        }
    }

    /// Whether the monitor currently holds subscriptions.
    pub fn is_monitoring(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Store `callback` and subscribe to the source.
    ///
    /// Calling again while monitoring swaps the callback only; exactly one
    /// subscription set exists at any time.
    pub fn start_monitoring(&mut self, callback: AssetChangedCallback) {
        *self.callback.lock() = Some(callback);

        if self.is_monitoring() {
            tracing::debug!("change monitor already active; callback replaced");
            return;
        }

        let added = self.relay_handler();
        let modified = self.relay_handler();

        let mut source = self.source.lock();
        let added_id = source.subscribe(ChangeEventClass::Added, added);
        let modified_id = source.subscribe(ChangeEventClass::Modified, modified);
        // Removal is subscribed but never relayed.
        let removed_id = source.subscribe(ChangeEventClass::Removed, Box::new(|_event| {}));
        drop(source);

        self.subscriptions
            .extend([added_id, modified_id, removed_id]);

        tracing::info!("script asset change monitoring started");
    }

    /// Unsubscribe from the source and drop the callback.
    pub fn stop_monitoring(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }

        let mut source = self.source.lock();
        for id in self.subscriptions.drain(..) {
            source.unsubscribe(id);
        }
        drop(source);
        *self.callback.lock() = None;

        tracing::info!("script asset change monitoring stopped");
    }

    fn relay_handler(&self) -> ChangeHandler {
        let slot = Arc::clone(&self.callback);
        let repository = Arc::clone(&self.repository);
        let watched_kind = self.watched_kind.clone();

        Box::new(move |event: &ChangeEvent| {
            if event.handle.kind != watched_kind {
                return;
            }
            // Resolution failure is a silent skip, same as a repository query.
            let Some(asset) = repository.resolve(&event.handle) else {
                return;
            };
            if let Some(callback) = slot.lock().as_mut() {
                callback(&asset);
            }
        })
    }
}

impl<S: ChangeNotificationSource> Drop for ChangeMonitor<S> {
    fn drop(&mut self) {
        self.stop_monitoring();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticRepository {
        assets: HashMap<String, ScriptAsset>,
    }

    impl StaticRepository {
        fn new(assets: impl IntoIterator<Item = ScriptAsset>) -> Self {
            Self {
                assets: assets
                    .into_iter()
                    .map(|asset| (asset.path.clone(), asset))
                    .collect(),
            }
        }
    }

    impl AssetRepository for StaticRepository {
        fn query_by_kind(&self, kind: &AssetKind) -> Vec<AssetHandle> {
            if *kind != AssetKind::ScriptAsset {
                return Vec::new();
            }
            self.assets
                .values()
                .map(|asset| AssetHandle::script(&asset.name, &asset.path))
                .collect()
        }

        fn resolve(&self, handle: &AssetHandle) -> Option<ScriptAsset> {
            self.assets.get(&handle.path).cloned()
        }
    }

    fn door_event(class: ChangeEventClass) -> ChangeEvent {
        ChangeEvent {
            class,
            handle: AssetHandle::script("Door", "/Game/Door"),
        }
    }

    fn setup() -> (
        Arc<Mutex<NotificationHub>>,
        ChangeMonitor<NotificationHub>,
        Arc<Mutex<Vec<String>>>,
    ) {
        let hub = Arc::new(Mutex::new(NotificationHub::new()));
        let repository: Arc<dyn AssetRepository + Send + Sync> = Arc::new(
            StaticRepository::new([ScriptAsset::new("Door", "/Game/Door")]),
        );
        let monitor = ChangeMonitor::new(Arc::clone(&hub), repository);
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        (hub, monitor, seen)
    }

    fn recording_callback(seen: &Arc<Mutex<Vec<String>>>) -> AssetChangedCallback {
        let seen = Arc::clone(seen);
        Box::new(move |asset| seen.lock().push(asset.name.clone()))
    }

    #[test]
    fn test_added_and_modified_are_relayed_removal_is_not() {
        let (hub, mut monitor, seen) = setup();
        monitor.start_monitoring(recording_callback(&seen));

        hub.lock().emit(&door_event(ChangeEventClass::Added));
        hub.lock().emit(&door_event(ChangeEventClass::Modified));
        hub.lock().emit(&door_event(ChangeEventClass::Removed));

        assert_eq!(*seen.lock(), ["Door", "Door"]);
    }

    #[test]
    fn test_other_asset_kinds_are_filtered() {
        let (hub, mut monitor, seen) = setup();
        monitor.start_monitoring(recording_callback(&seen));

        hub.lock().emit(&ChangeEvent {
            class: ChangeEventClass::Added,
            handle: AssetHandle {
                name: "Grass".to_string(),
                path: "/Game/Grass".to_string(),
                kind: AssetKind::Other("Texture".to_string()),
            },
        });

        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_unresolvable_assets_are_skipped() {
        let (hub, mut monitor, seen) = setup();
        monitor.start_monitoring(recording_callback(&seen));

        hub.lock().emit(&ChangeEvent {
            class: ChangeEventClass::Modified,
            handle: AssetHandle::script("Ghost", "/Game/Ghost"),
        });

        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_double_start_keeps_one_subscription_set() {
        let (hub, mut monitor, seen) = setup();
        monitor.start_monitoring(recording_callback(&seen));
        monitor.start_monitoring(recording_callback(&seen));

        assert_eq!(hub.lock().handler_count(), 3);

        hub.lock().emit(&door_event(ChangeEventClass::Modified));
        assert_eq!(*seen.lock(), ["Door"]);
    }

    #[test]
    fn test_stop_is_idempotent_and_silences_events() {
        let (hub, mut monitor, seen) = setup();

        // Stopping while idle is a no-op.
        monitor.stop_monitoring();
        assert!(!monitor.is_monitoring());

        monitor.start_monitoring(recording_callback(&seen));
        assert!(monitor.is_monitoring());

        monitor.stop_monitoring();
        assert_eq!(hub.lock().handler_count(), 0);

        hub.lock().emit(&door_event(ChangeEventClass::Added));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let (hub, mut monitor, seen) = setup();
        monitor.start_monitoring(recording_callback(&seen));
        drop(monitor);
        assert_eq!(hub.lock().handler_count(), 0);
    }
}
