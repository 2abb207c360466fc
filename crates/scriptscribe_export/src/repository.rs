// SPDX-License-Identifier: MIT OR Apache-2.0
//! Collaborator interfaces: asset discovery and document persistence.
//!
//! The export engine never owns asset storage. It consumes an
//! [`AssetRepository`] to discover and resolve script assets and a
//! [`Persistence`] sink to write documents, both injected by the caller.
//! Filesystem-backed implementations of each are provided for use outside
//! a host runtime.

use scriptscribe_graph::{asset::ASSET_EXTENSION, ScriptAsset};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Kind discriminator for repository assets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// A visual-script asset
    ScriptAsset,
    /// Any other asset kind, by name
    Other(String),
}

/// Lightweight handle to an asset known to a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHandle {
    /// Asset name
    pub name: String,
    /// Asset path, in repository terms
    pub path: String,
    /// Asset kind
    pub kind: AssetKind,
}

impl AssetHandle {
    /// Create a handle to a script asset.
    pub fn script(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: AssetKind::ScriptAsset,
        }
    }
}

/// Source of script assets
pub trait AssetRepository {
    /// Handles of every known asset of `kind`, in a stable order.
    fn query_by_kind(&self, kind: &AssetKind) -> Vec<AssetHandle>;

    /// Materialize the asset behind `handle`.
    ///
    /// `None` when the asset can no longer be resolved (deleted mid-query,
    /// unreadable, malformed); callers treat this as a skip, not a fatal
    /// error.
    fn resolve(&self, handle: &AssetHandle) -> Option<ScriptAsset>;
}

impl<R: AssetRepository + ?Sized> AssetRepository for Arc<R> {
    fn query_by_kind(&self, kind: &AssetKind) -> Vec<AssetHandle> {
        (**self).query_by_kind(kind)
    }

    fn resolve(&self, handle: &AssetHandle) -> Option<ScriptAsset> {
        (**self).resolve(handle)
    }
}

/// Sink for exported document text
pub trait Persistence {
    /// Write `text` at `path`.
    fn write(&self, path: &Path, text: &str) -> std::io::Result<()>;
}

/// Filesystem persistence: creates parent directories and writes the file
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPersistence;

impl Persistence for FsPersistence {
    fn write(&self, path: &Path, text: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, text)
    }
}

/// Directory-backed asset repository.
///
/// Script assets are RON files with the `.scriptasset` extension anywhere
/// under the root directory. Queries re-scan the directory so the
/// repository never goes stale; resolution re-reads the file.
#[derive(Debug, Clone)]
pub struct FsAssetRepository {
    root: PathBuf,
}

impl FsAssetRepository {
    /// Open a repository over `root`.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build the handle for an asset file path, if it is one.
    pub fn handle_for(path: &Path) -> Option<AssetHandle> {
        if path.extension().and_then(|e| e.to_str()) != Some(ASSET_EXTENSION) {
            return None;
        }
        let name = path.file_stem()?.to_str()?;
        Some(AssetHandle::script(name, path.display().to_string()))
    }
}

impl AssetRepository for FsAssetRepository {
    fn query_by_kind(&self, kind: &AssetKind) -> Vec<AssetHandle> {
        if *kind != AssetKind::ScriptAsset {
            return Vec::new();
        }

        let mut handles: Vec<AssetHandle> = walkdir::WalkDir::new(&self.root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| Self::handle_for(entry.path()))
            .collect();
        // Path order keeps query results stable across scans
        handles.sort_by(|a, b| a.path.cmp(&b.path));
        handles
    }

    fn resolve(&self, handle: &AssetHandle) -> Option<ScriptAsset> {
        let text = match fs::read_to_string(&handle.path) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(path = %handle.path, "failed to read asset: {error}");
                return None;
            }
        };
        match ScriptAsset::from_ron(&text) {
            Ok(asset) => Some(asset),
            Err(error) => {
                tracing::warn!(path = %handle.path, "failed to parse asset: {error}");
                None
            }
        }
    }
}
