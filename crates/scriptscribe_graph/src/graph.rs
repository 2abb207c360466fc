// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and wires.

use crate::node::{Node, NodeId};
use crate::port::PortDirection;
use crate::wire::Wire;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A script graph: a named, ordered collection of nodes plus the wires
/// between their ports.
///
/// Node iteration preserves whatever order the source provided. Wires are
/// never de-duplicated; a source port driving several inputs keeps one wire
/// per link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes, keyed by ID in insertion order
    nodes: IndexMap<NodeId, Node>,
    /// Wires between node ports
    wires: Vec<Wire>,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            wires: Vec::new(),
        }
    }

    /// Add a node to the graph, returning its ID.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Get a node by ID.
    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a wire between two ports.
    pub fn connect(
        &mut self,
        from_node: impl Into<NodeId>,
        from_port: &str,
        to_node: impl Into<NodeId>,
        to_port: &str,
    ) -> Result<(), WireError> {
        let from_node = from_node.into();
        let to_node = to_node.into();

        let source = self
            .nodes
            .get(&from_node)
            .ok_or_else(|| WireError::NodeNotFound(from_node.clone()))?;
        let source_port = source
            .port(from_port)
            .ok_or_else(|| WireError::PortNotFound {
                node: from_node.clone(),
                port: from_port.to_string(),
            })?;
        if source_port.direction != PortDirection::Output {
            return Err(WireError::NotAnOutput {
                node: from_node,
                port: from_port.to_string(),
            });
        }

        let target = self
            .nodes
            .get(&to_node)
            .ok_or_else(|| WireError::NodeNotFound(to_node.clone()))?;
        let target_port = target.port(to_port).ok_or_else(|| WireError::PortNotFound {
            node: to_node.clone(),
            port: to_port.to_string(),
        })?;
        if target_port.direction != PortDirection::Input {
            return Err(WireError::NotAnInput {
                node: to_node,
                port: to_port.to_string(),
            });
        }

        self.wires
            .push(Wire::new(from_node, from_port, to_node, to_port));
        Ok(())
    }

    /// All wires, in insertion order.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Wires leaving a specific port of a node.
    pub fn wires_from<'a>(
        &'a self,
        node_id: &'a NodeId,
        port: &'a str,
    ) -> impl Iterator<Item = &'a Wire> {
        self.wires.iter().filter(move |w| w.originates_at(node_id, port))
    }

    /// Unique downstream node IDs reachable over the node's output wires.
    ///
    /// Output ports are visited in declaration order, wires per port in
    /// insertion order; a target node appears once, at its first occurrence.
    pub fn connected_nodes(&self, node_id: &NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(node_id) else {
            return Vec::new();
        };

        let mut connected = Vec::new();
        for port in node.output_ports() {
            for wire in self.wires_from(node_id, &port.name) {
                if !connected.contains(&wire.to_node) {
                    connected.push(wire.to_node.clone());
                }
            }
        }
        connected
    }
}

/// Error when creating a wire
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Node not found
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Port not found on a node
    #[error("port not found: {node}.{port}")]
    PortNotFound {
        /// Owning node
        node: NodeId,
        /// Port name
        port: String,
    },

    /// Wire source must be an output port
    #[error("not an output port: {node}.{port}")]
    NotAnOutput {
        /// Owning node
        node: NodeId,
        /// Port name
        port: String,
    },

    /// Wire target must be an input port
    #[error("not an input port: {node}.{port}")]
    NotAnInput {
        /// Owning node
        node: NodeId,
        /// Port name
        port: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use crate::port::{PinCategory, PinType, Port};

    fn exec_node(id: &str, kind: NodeKind) -> Node {
        Node::new(id, kind, id)
            .with_port(Port::input("In", PinType::new(PinCategory::Exec)))
            .with_port(Port::output("Out", PinType::new(PinCategory::Exec)))
    }

    #[test]
    fn test_connect_validates_endpoints() {
        let mut graph = Graph::new("EventGraph");
        graph.add_node(exec_node("A", NodeKind::Event));
        graph.add_node(exec_node("B", NodeKind::VariableWrite));

        assert!(graph.connect("A", "Out", "B", "In").is_ok());
        assert!(matches!(
            graph.connect("A", "Out", "C", "In"),
            Err(WireError::NodeNotFound(_))
        ));
        assert!(matches!(
            graph.connect("A", "Missing", "B", "In"),
            Err(WireError::PortNotFound { .. })
        ));
        assert!(matches!(
            graph.connect("A", "In", "B", "In"),
            Err(WireError::NotAnOutput { .. })
        ));
        assert!(matches!(
            graph.connect("A", "Out", "B", "Out"),
            Err(WireError::NotAnInput { .. })
        ));
    }

    #[test]
    fn test_fan_out_keeps_every_wire() {
        let mut graph = Graph::new("EventGraph");
        graph.add_node(exec_node("N1", NodeKind::Event));
        graph.add_node(exec_node("N2", NodeKind::VariableWrite));
        graph.add_node(exec_node("N3", NodeKind::VariableWrite));

        graph.connect("N1", "Out", "N2", "In").unwrap();
        graph.connect("N1", "Out", "N3", "In").unwrap();

        assert_eq!(graph.wires().len(), 2);
        assert_eq!(
            graph.connected_nodes(&NodeId::from("N1")),
            vec![NodeId::from("N2"), NodeId::from("N3")]
        );
    }

    #[test]
    fn test_connected_nodes_deduplicates_targets() {
        let mut graph = Graph::new("EventGraph");
        let source = Node::new("Src", NodeKind::Event, "Src")
            .with_port(Port::output("Then", PinType::new(PinCategory::Exec)))
            .with_port(Port::output("Value", PinType::new(PinCategory::Int)));
        let sink = Node::new("Sink", NodeKind::VariableWrite, "Sink")
            .with_port(Port::input("In", PinType::new(PinCategory::Exec)))
            .with_port(Port::input("Value", PinType::new(PinCategory::Int)));
        graph.add_node(source);
        graph.add_node(sink);

        // Two wires into the same node collapse to one connection entry,
        // but both wires stay in the model.
        graph.connect("Src", "Then", "Sink", "In").unwrap();
        graph.connect("Src", "Value", "Sink", "Value").unwrap();

        assert_eq!(graph.wires().len(), 2);
        assert_eq!(
            graph.connected_nodes(&NodeId::from("Src")),
            vec![NodeId::from("Sink")]
        );
    }

    #[test]
    fn test_connected_nodes_for_unknown_node_is_empty() {
        let graph = Graph::new("EventGraph");
        assert!(graph.connected_nodes(&NodeId::from("Ghost")).is_empty());
    }
}
