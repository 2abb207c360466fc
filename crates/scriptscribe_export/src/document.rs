// SPDX-License-Identifier: MIT OR Apache-2.0
//! Document encoding for script assets.
//!
//! The document shape (field names and nesting) is an external contract
//! consumed by downstream tooling; struct declaration order fixes the JSON
//! field order, and optional fields are omitted rather than emitted as
//! null or empty.

use crate::dependencies::extract_dependencies;
use scriptscribe_graph::{
    Graph, Node, NodeKind, PinValue, Port, PortDirection, ScriptAsset, VariableDecl,
};
use serde::{Deserialize, Serialize};

/// Value of the `class_type` document field
const CLASS_TYPE: &str = "Blueprint";

/// Errors produced by the document encoders
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// No asset was supplied to the encoder
    #[error("no script asset supplied")]
    MissingAsset,
}

/// Top-level document for one script asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDocument {
    /// Asset name
    pub name: String,
    /// Asset path
    pub path: String,
    /// Always `"Blueprint"`
    pub class_type: String,
    /// Parent type name, omitted when the script has none
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent_class: Option<String>,
    /// Generated type name, omitted when none exists
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub generated_class: Option<String>,
    /// Top-level graphs followed by function graphs
    pub graphs: Vec<GraphDocument>,
    /// Declared variables
    pub variables: Vec<VariableDocument>,
    /// Function signatures with their embedded graphs
    pub functions: Vec<FunctionDocument>,
    /// Attached components with a concrete template
    pub components: Vec<ComponentDocument>,
    /// External paths referenced by the top-level graphs
    pub dependencies: Vec<String>,
}

/// One graph inside a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Graph name
    pub name: String,
    /// Nodes, in source order
    pub nodes: Vec<NodeDocument>,
}

/// One node inside a graph document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    /// Node identity
    pub id: String,
    /// Classification tag, or the concrete type name for unclassified kinds
    #[serde(rename = "type")]
    pub node_type: String,
    /// Display title
    pub title: String,
    /// Menu category, possibly empty
    pub category: String,
    /// Editor position
    pub position: PositionDocument,
    /// Ports, in declaration order
    pub pins: Vec<PinDocument>,
    /// Unique downstream node identities, in first-seen order
    pub connections: Vec<String>,
}

/// A 2-D editor position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDocument {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

/// One pin inside a node document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinDocument {
    /// Pin name
    pub name: String,
    /// Display name
    pub display_name: String,
    /// `"input"` or `"output"`
    pub direction: String,
    /// Canonical type string
    #[serde(rename = "type")]
    pub pin_type: String,
    /// Rendered default literal; omitted when empty or absent
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<String>,
}

/// One variable inside a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDocument {
    /// Variable name
    pub name: String,
    /// Canonical type string
    #[serde(rename = "type")]
    pub var_type: String,
    /// Category label
    pub category: String,
    /// Whether the variable is exposed to instances
    pub is_exposed: bool,
    /// Rendered default literal; omitted when empty or absent
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<String>,
}

/// One function inside a document: signature plus embedded graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDocument {
    /// Function name (the function graph's name)
    pub name: String,
    /// Parameters taken from the entry node
    pub parameters: Vec<ParameterDocument>,
    /// The function graph itself
    pub graph: GraphDocument,
}

/// One function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDocument {
    /// Parameter name
    pub name: String,
    /// Canonical type string
    #[serde(rename = "type")]
    pub param_type: String,
}

/// One attached component inside a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDocument {
    /// Component name
    pub name: String,
    /// Concrete implementing type
    #[serde(rename = "class")]
    pub class_name: String,
}

/// Serialize one script asset into its document.
///
/// Returns [`EncodeError::MissingAsset`] when no asset is supplied; the
/// encoder never inspects graph semantics, it reports structure as found.
pub fn serialize_asset(asset: Option<&ScriptAsset>) -> Result<AssetDocument, EncodeError> {
    let asset = asset.ok_or(EncodeError::MissingAsset)?;

    Ok(AssetDocument {
        name: asset.name.clone(),
        path: asset.path.clone(),
        class_type: CLASS_TYPE.to_string(),
        parent_class: asset.parent_class.clone(),
        generated_class: asset.generated_class.clone(),
        graphs: asset.all_graphs().map(encode_graph).collect(),
        variables: asset.variables.iter().map(encode_variable).collect(),
        functions: asset.function_graphs.iter().map(encode_function).collect(),
        components: asset
            .components
            .iter()
            .filter_map(|component| {
                component.template_class.as_ref().map(|class_name| ComponentDocument {
                    name: component.name.clone(),
                    class_name: class_name.clone(),
                })
            })
            .collect(),
        dependencies: extract_dependencies(&asset.graphs),
    })
}

/// Serialize an asset straight to a JSON string.
///
/// An absent asset yields the `{}` placeholder; the failure is logged, not
/// propagated, so callers can treat the result as best-effort.
pub fn asset_to_json(asset: Option<&ScriptAsset>) -> String {
    match serialize_asset(asset) {
        Ok(document) => match serde_json::to_string(&document) {
            Ok(text) => text,
            Err(error) => {
                tracing::error!("failed to render asset document: {error}");
                "{}".to_string()
            }
        },
        Err(error) => {
            tracing::error!("asset export failed: {error}");
            "{}".to_string()
        }
    }
}

/// Encode one graph.
pub fn encode_graph(graph: &Graph) -> GraphDocument {
    GraphDocument {
        name: graph.name.clone(),
        nodes: graph.nodes().map(|node| encode_node(graph, node)).collect(),
    }
}

fn encode_node(graph: &Graph, node: &Node) -> NodeDocument {
    NodeDocument {
        id: node.id.as_str().to_string(),
        node_type: node.kind.type_string().to_string(),
        title: node.title.clone(),
        category: node.category.clone(),
        position: PositionDocument {
            x: f64::from(node.position[0]),
            y: f64::from(node.position[1]),
        },
        pins: node.ports.iter().map(encode_pin).collect(),
        connections: graph
            .connected_nodes(&node.id)
            .into_iter()
            .map(|id| id.0)
            .collect(),
    }
}

fn encode_pin(port: &Port) -> PinDocument {
    PinDocument {
        name: port.name.clone(),
        display_name: port.display_name.clone(),
        direction: direction_string(port.direction).to_string(),
        pin_type: port.pin_type.type_string(),
        default_value: rendered_default(port.default_value.as_ref()),
    }
}

fn encode_variable(variable: &VariableDecl) -> VariableDocument {
    VariableDocument {
        name: variable.name.clone(),
        var_type: variable.var_type.type_string(),
        category: variable.category.clone(),
        is_exposed: variable.exposed,
        default_value: rendered_default(variable.default_value.as_ref()),
    }
}

fn encode_function(graph: &Graph) -> FunctionDocument {
    // The parameter list comes from the graph's entry node: its
    // output-direction, non-exec pins are the values the function receives.
    let parameters = graph
        .nodes()
        .filter(|node| matches!(node.kind, NodeKind::FunctionEntry))
        .flat_map(|entry| {
            entry
                .output_ports()
                .filter(|port| !port.pin_type.is_exec())
                .map(|port| ParameterDocument {
                    name: port.name.clone(),
                    param_type: port.pin_type.type_string(),
                })
        })
        .collect();

    FunctionDocument {
        name: graph.name.clone(),
        parameters,
        graph: encode_graph(graph),
    }
}

fn direction_string(direction: PortDirection) -> &'static str {
    match direction {
        PortDirection::Input => "input",
        PortDirection::Output => "output",
    }
}

// An empty rendering means "driven by a wire or engine default", so the
// field is absent rather than an empty string.
fn rendered_default(value: Option<&PinValue>) -> Option<String> {
    value.map(PinValue::render).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptscribe_graph::{
        ComponentDecl, FunctionRef, Node, NodeKind, ObjectRef, PinCategory, PinType, PinValue,
        Port, VariableDecl,
    };

    fn door_asset() -> ScriptAsset {
        let mut graph = Graph::new("EventGraph");
        graph.add_node(
            Node::new("EvtBeginPlay", NodeKind::Event, "Event BeginPlay")
                .with_category("Events")
                .with_port(Port::output("Then", PinType::new(PinCategory::Exec))),
        );
        graph.add_node(
            Node::new(
                "CallOpen",
                NodeKind::CallExternalFunction(
                    FunctionRef::new("Open").owned_by("/Game/Interact.InteractInterface"),
                ),
                "Open",
            )
            .with_port(Port::input("In", PinType::new(PinCategory::Exec))),
        );
        graph.connect("EvtBeginPlay", "Then", "CallOpen", "In").unwrap();

        ScriptAsset::new("Door", "/Game/Door").with_graph(graph)
    }

    #[test]
    fn test_missing_asset_is_an_input_error() {
        assert!(matches!(
            serialize_asset(None),
            Err(EncodeError::MissingAsset)
        ));
        assert_eq!(asset_to_json(None), "{}");
    }

    #[test]
    fn test_door_end_to_end() {
        let document = serialize_asset(Some(&door_asset())).unwrap();

        assert_eq!(document.name, "Door");
        assert_eq!(document.class_type, "Blueprint");
        assert_eq!(document.graphs.len(), 1);
        assert_eq!(document.graphs[0].nodes.len(), 2);
        assert_eq!(document.graphs[0].nodes[0].connections, ["CallOpen"]);
        assert_eq!(document.graphs[0].nodes[1].node_type, "CallExternalFunction");
        assert_eq!(
            document.dependencies,
            ["/Game/Interact.InteractInterface"]
        );
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let asset = door_asset();
        let first = serde_json::to_string(&serialize_asset(Some(&asset)).unwrap()).unwrap();
        let second = serde_json::to_string(&serialize_asset(Some(&asset)).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let asset = ScriptAsset::new("Bare", "/Game/Bare").with_variable(VariableDecl::new(
            "Label",
            PinType::new(PinCategory::String),
        ));

        let text = serde_json::to_string(&serialize_asset(Some(&asset)).unwrap()).unwrap();
        assert!(!text.contains("parent_class"));
        assert!(!text.contains("generated_class"));
        assert!(!text.contains("default_value"));
    }

    #[test]
    fn test_empty_default_literal_is_omitted() {
        let asset = ScriptAsset::new("Bare", "/Game/Bare").with_variable(
            VariableDecl::new("Label", PinType::new(PinCategory::String))
                .with_default(PinValue::String(String::new())),
        );

        let document = serialize_asset(Some(&asset)).unwrap();
        assert_eq!(document.variables[0].default_value, None);

        let text = serde_json::to_string(&document).unwrap();
        assert!(!text.contains("default_value"));
    }

    #[test]
    fn test_pin_default_literal_is_rendered() {
        let mut graph = Graph::new("EventGraph");
        graph.add_node(
            Node::new("SetSpeed", NodeKind::VariableWrite, "Set Speed").with_port(
                Port::input("Value", PinType::new(PinCategory::Float))
                    .with_default(PinValue::Float(2.5)),
            ),
        );
        let asset = ScriptAsset::new("Mover", "/Game/Mover").with_graph(graph);

        let document = serialize_asset(Some(&asset)).unwrap();
        let pin = &document.graphs[0].nodes[0].pins[0];
        assert_eq!(pin.direction, "input");
        assert_eq!(pin.pin_type, "float");
        assert_eq!(pin.default_value.as_deref(), Some("2.5"));
    }

    #[test]
    fn test_function_signature_and_graph_stay_in_sync() {
        let mut function_graph = Graph::new("OpenDoor");
        function_graph.add_node(
            Node::new("Entry", NodeKind::FunctionEntry, "Open Door")
                .with_port(Port::output("Then", PinType::new(PinCategory::Exec)))
                .with_port(Port::output("Speed", PinType::new(PinCategory::Float)))
                .with_port(Port::output(
                    "Target",
                    PinType::new(PinCategory::Object).with_sub_object("Door"),
                )),
        );
        let asset = ScriptAsset::new("Door", "/Game/Door").with_function_graph(function_graph);

        let document = serialize_asset(Some(&asset)).unwrap();

        // Function graphs appear both in `graphs` and embedded in `functions`.
        assert_eq!(document.graphs.len(), 1);
        assert_eq!(document.functions.len(), 1);
        let function = &document.functions[0];
        assert_eq!(function.name, "OpenDoor");
        assert_eq!(function.graph, document.graphs[0]);

        // Exec pins never become parameters.
        assert_eq!(function.parameters.len(), 2);
        assert_eq!(function.parameters[0].name, "Speed");
        assert_eq!(function.parameters[0].param_type, "float");
        assert_eq!(function.parameters[1].param_type, "object<Door>");
    }

    #[test]
    fn test_components_without_template_are_skipped() {
        let asset = ScriptAsset::new("Door", "/Game/Door")
            .with_component(ComponentDecl::new("Mesh", "StaticMeshComponent"))
            .with_component(ComponentDecl::without_template("Ghost"));

        let document = serialize_asset(Some(&asset)).unwrap();
        assert_eq!(document.components.len(), 1);
        assert_eq!(document.components[0].name, "Mesh");
        assert_eq!(document.components[0].class_name, "StaticMeshComponent");
    }

    #[test]
    fn test_dependencies_cover_top_level_graphs_only() {
        let mut top = Graph::new("EventGraph");
        top.add_node(
            Node::new(
                "CallA",
                NodeKind::CallExternalFunction(FunctionRef::new("A").owned_by("/Game/A")),
                "A",
            ),
        );
        let mut function_graph = Graph::new("Helper");
        function_graph.add_node(
            Node::new(
                "CallB",
                NodeKind::CallExternalFunction(FunctionRef::new("B").owned_by("/Game/B")),
                "B",
            ),
        );

        let asset = ScriptAsset::new("Door", "/Game/Door")
            .with_graph(top)
            .with_function_graph(function_graph);

        let document = serialize_asset(Some(&asset)).unwrap();
        assert_eq!(document.dependencies, ["/Game/A"]);
    }

    #[test]
    fn test_object_pin_default_feeds_dependencies() {
        let mut graph = Graph::new("EventGraph");
        graph.add_node(
            Node::new("GetDoor", NodeKind::VariableRead, "Get Door").with_port(
                Port::output("Door", PinType::new(PinCategory::Object).with_sub_object("Door"))
                    .with_default_object(ObjectRef::new("FrontDoor", "/Game/Doors/FrontDoor")),
            ),
        );
        let asset = ScriptAsset::new("Door", "/Game/Door").with_graph(graph);

        let document = serialize_asset(Some(&asset)).unwrap();
        assert_eq!(document.dependencies, ["/Game/Doors/FrontDoor"]);
    }
}
