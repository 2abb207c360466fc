// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dependency extraction across script graphs.

use indexmap::IndexSet;
use scriptscribe_graph::{Graph, NodeKind};

/// Collect the external paths referenced by `graphs`.
///
/// Two reference sources are scanned, in caller-given graph order and
/// source node order: the owning type of every externally called function,
/// and the default object of every object-category port. The result is
/// de-duplicated with first-occurrence order preserved, so repeated runs on
/// the same input yield the same list.
///
/// References that resolve to an empty path are skipped; the extractor does
/// not distinguish "no dependency" from a failed lookup.
pub fn extract_dependencies<'a, I>(graphs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Graph>,
{
    let mut dependencies: IndexSet<String> = IndexSet::new();

    for graph in graphs {
        for node in graph.nodes() {
            if let NodeKind::CallExternalFunction(function) = &node.kind {
                if let Some(owner_path) = &function.owner_path {
                    if !owner_path.is_empty() {
                        dependencies.insert(owner_path.clone());
                    }
                }
            }

            for port in &node.ports {
                if !port.pin_type.category.is_object_reference() {
                    continue;
                }
                if let Some(object) = &port.default_object {
                    if !object.path.is_empty() {
                        dependencies.insert(object.path.clone());
                    }
                }
            }
        }
    }

    dependencies.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptscribe_graph::{
        FunctionRef, Node, NodeKind, ObjectRef, PinCategory, PinType, Port,
    };

    fn call_node(id: &str, owner: &str) -> Node {
        Node::new(
            id,
            NodeKind::CallExternalFunction(FunctionRef::new(id).owned_by(owner)),
            id,
        )
    }

    #[test]
    fn test_first_occurrence_order_is_preserved() {
        let mut graph = Graph::new("EventGraph");
        graph.add_node(call_node("C1", "A"));
        graph.add_node(call_node("C2", "B"));
        graph.add_node(call_node("C3", "A"));
        graph.add_node(call_node("C4", "C"));

        assert_eq!(extract_dependencies([&graph]), ["A", "B", "C"]);
    }

    #[test]
    fn test_graphs_are_scanned_in_caller_order() {
        let mut first = Graph::new("First");
        first.add_node(call_node("C1", "B"));
        let mut second = Graph::new("Second");
        second.add_node(call_node("C2", "A"));
        second.add_node(call_node("C3", "B"));

        assert_eq!(extract_dependencies([&first, &second]), ["B", "A"]);
    }

    #[test]
    fn test_empty_owner_paths_are_skipped() {
        let mut graph = Graph::new("EventGraph");
        graph.add_node(Node::new(
            "C1",
            NodeKind::CallExternalFunction(FunctionRef::new("Local")),
            "Local",
        ));
        graph.add_node(call_node("C2", ""));

        assert!(extract_dependencies([&graph]).is_empty());
    }

    #[test]
    fn test_object_defaults_count_only_on_object_pins() {
        let mut graph = Graph::new("EventGraph");
        graph.add_node(
            Node::new("N", NodeKind::VariableRead, "N")
                .with_port(
                    Port::output("Door", PinType::new(PinCategory::Object))
                        .with_default_object(ObjectRef::new("FrontDoor", "/Game/FrontDoor")),
                )
                .with_port(
                    // Non-object category: the default object is ignored.
                    Port::output("Tag", PinType::new(PinCategory::Name))
                        .with_default_object(ObjectRef::new("Tag", "/Game/Tag")),
                ),
        );

        assert_eq!(extract_dependencies([&graph]), ["/Game/FrontDoor"]);
    }
}
