// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wire (edge) definitions for script graphs.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// A directed link from an output port to an input port.
///
/// Wires are stored flat on the graph; fan-out is several wires sharing the
/// same source node and port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    /// Source node ID
    pub from_node: NodeId,
    /// Source port name
    pub from_port: String,
    /// Target node ID
    pub to_node: NodeId,
    /// Target port name
    pub to_port: String,
}

impl Wire {
    /// Create a new wire.
    pub fn new(
        from_node: impl Into<NodeId>,
        from_port: impl Into<String>,
        to_node: impl Into<NodeId>,
        to_port: impl Into<String>,
    ) -> Self {
        Self {
            from_node: from_node.into(),
            from_port: from_port.into(),
            to_node: to_node.into(),
            to_port: to_port.into(),
        }
    }

    /// Check if this wire involves a specific node.
    pub fn involves_node(&self, node_id: &NodeId) -> bool {
        self.from_node == *node_id || self.to_node == *node_id
    }

    /// Check if this wire starts at a specific port of a node.
    pub fn originates_at(&self, node_id: &NodeId, port: &str) -> bool {
        self.from_node == *node_id && self.from_port == port
    }
}
