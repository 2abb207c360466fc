// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export service: resolves assets and writes their documents.

use crate::document::{serialize_asset, EncodeError};
use crate::repository::{AssetHandle, AssetKind, AssetRepository, Persistence};
use scriptscribe_graph::ScriptAsset;
use std::path::Path;

/// Errors surfaced by the exporter service
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The handle could not be resolved to an asset
    #[error("asset could not be resolved: {0}")]
    AssetUnavailable(String),

    /// Document encoding failed
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// JSON rendering failed
    #[error("document rendering failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The persistence sink rejected the write
    #[error("failed to write document: {0}")]
    Persist(#[from] std::io::Error),
}

/// Exports script assets from a repository through a persistence sink.
pub struct Exporter<R, P> {
    repository: R,
    persistence: P,
}

impl<R: AssetRepository, P: Persistence> Exporter<R, P> {
    /// Create an exporter over the given collaborators.
    pub fn new(repository: R, persistence: P) -> Self {
        Self {
            repository,
            persistence,
        }
    }

    /// Serialize `asset` and write its document to `path`.
    pub fn write_document(&self, asset: &ScriptAsset, path: &Path) -> Result<(), ExportError> {
        let document = serialize_asset(Some(asset))?;
        let text = serde_json::to_string_pretty(&document)?;
        self.persistence.write(path, &text)?;
        tracing::info!(asset = %asset.name, path = %path.display(), "exported script asset");
        Ok(())
    }

    /// Resolve `handle` and write its document to `path`.
    pub fn export_to_file(&self, handle: &AssetHandle, path: &Path) -> Result<(), ExportError> {
        let asset = self
            .repository
            .resolve(handle)
            .ok_or_else(|| ExportError::AssetUnavailable(handle.path.clone()))?;
        self.write_document(&asset, path)
    }

    /// Export every script asset to `<name>.json` under `output_dir`.
    ///
    /// Assets that fail to resolve, encode or write are logged and skipped;
    /// the return value is the number actually exported.
    pub fn export_all(&self, output_dir: &Path) -> usize {
        let handles = self.repository.query_by_kind(&AssetKind::ScriptAsset);
        let mut exported = 0;

        for handle in &handles {
            let path = output_dir.join(format!("{}.json", handle.name));
            match self.export_to_file(handle, &path) {
                Ok(()) => exported += 1,
                Err(error) => {
                    tracing::warn!(asset = %handle.name, "skipping asset: {error}");
                }
            }
        }

        tracing::info!(
            "exported {exported} of {} script assets to {}",
            handles.len(),
            output_dir.display()
        );
        exported
    }
}
