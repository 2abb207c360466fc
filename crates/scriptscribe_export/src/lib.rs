// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export engine for `ScriptScribe`.
//!
//! This crate turns a script asset into a portable JSON document and
//! extracts the external definitions the asset references:
//! - Document encoding (assets, graphs, nodes, pins)
//! - Dependency extraction with stable, de-duplicated ordering
//! - An exporter service writing documents through a persistence sink
//! - A change monitor re-dispatching asset change notifications
//!
//! ## Architecture
//!
//! Encoding is a pure, synchronous walk over one asset; the exporter and
//! monitor sit on top of injected collaborator interfaces (asset
//! repository, persistence, change-notification source) so no global state
//! is involved.

pub mod dependencies;
pub mod document;
pub mod exporter;
pub mod monitor;
pub mod repository;

pub use dependencies::extract_dependencies;
pub use document::{asset_to_json, serialize_asset, AssetDocument, EncodeError};
pub use exporter::{ExportError, Exporter};
pub use monitor::{
    ChangeEvent, ChangeEventClass, ChangeMonitor, ChangeNotificationSource, NotificationHub,
};
pub use repository::{AssetHandle, AssetKind, AssetRepository, FsAssetRepository, FsPersistence, Persistence};
