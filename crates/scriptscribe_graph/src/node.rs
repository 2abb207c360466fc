// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for script graphs.

use crate::port::{Port, PortDirection};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a node, unique within its graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Reference to an externally defined function invoked by a call node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRef {
    /// Function name
    pub function: String,
    /// Path of the type that owns the function, when known
    pub owner_path: Option<String>,
}

impl FunctionRef {
    /// Create a reference with no known owner.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            owner_path: None,
        }
    }

    /// Set the owning type path.
    pub fn owned_by(mut self, path: impl Into<String>) -> Self {
        self.owner_path = Some(path.into());
        self
    }
}

/// Closed classification of node kinds.
///
/// Every node maps to exactly one variant; kinds outside the taxonomy fall
/// back to [`NodeKind::Other`] carrying the concrete type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Event entry point (begin play, tick, input, ...)
    Event,
    /// Entry node of a function graph
    FunctionEntry,
    /// Invocation of an externally defined function
    CallExternalFunction(FunctionRef),
    /// Read of a script variable
    VariableRead,
    /// Write of a script variable
    VariableWrite,
    /// Any other kind, carrying the concrete type name
    Other(String),
}

impl NodeKind {
    /// Classification tag emitted into documents.
    pub fn type_string(&self) -> &str {
        match self {
            Self::Event => "Event",
            Self::FunctionEntry => "FunctionEntry",
            Self::CallExternalFunction(_) => "CallExternalFunction",
            Self::VariableRead => "VariableRead",
            Self::VariableWrite => "VariableWrite",
            Self::Other(type_name) => type_name,
        }
    }
}

/// A node instance in a script graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identity, unique within the owning graph
    pub id: NodeId,
    /// Kind classification
    pub kind: NodeKind,
    /// Display title
    pub title: String,
    /// Menu category, possibly empty
    pub category: String,
    /// Position in the graph editor
    pub position: [f32; 2],
    /// Ports, in declaration order
    pub ports: Vec<Port>,
}

impl Node {
    /// Create a new node.
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            category: String::new(),
            position: [0.0, 0.0],
            ports: Vec::new(),
        }
    }

    /// Set the menu category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the position.
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Append a port.
    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    /// Get a port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Output-direction ports, in declaration order.
    pub fn output_ports(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .iter()
            .filter(|p| p.direction == PortDirection::Output)
    }
}
