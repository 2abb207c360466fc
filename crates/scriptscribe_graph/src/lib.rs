// SPDX-License-Identifier: MIT OR Apache-2.0
//! Script asset model for `ScriptScribe`.
//!
//! This crate defines the read-only view of a visual-script asset that the
//! export engine walks:
//! - Assets with event graphs, function graphs, variables and components
//! - Typed input/output ports with default literals
//! - Wires stored flat per graph (no back-references between entities)
//!
//! ## Architecture
//!
//! Nodes live in an insertion-ordered map per graph and wires are plain
//! (source node/port, target node/port) pairs, so graph topology is walked
//! by id lookup rather than by chasing object references.

pub mod asset;
pub mod graph;
pub mod node;
pub mod port;
pub mod wire;

pub use asset::{ComponentDecl, ScriptAsset, VariableDecl};
pub use graph::Graph;
pub use node::{FunctionRef, Node, NodeId, NodeKind};
pub use port::{ObjectRef, PinCategory, PinType, PinValue, Port, PortDirection};
pub use wire::Wire;
