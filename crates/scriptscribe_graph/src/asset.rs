// SPDX-License-Identifier: MIT OR Apache-2.0
//! Script asset definitions.
//!
//! A script asset bundles the graphs, variables and components of one
//! visual-script definition. Assets are read-only views for the export
//! engine; they are built by an authoring tool or loaded from RON text.

use crate::graph::Graph;
use crate::port::{PinType, PinValue};
use serde::{Deserialize, Serialize};

/// File extension for RON-stored script assets
pub const ASSET_EXTENSION: &str = "scriptasset";

/// A declared script variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    /// Variable name
    pub name: String,
    /// Semantic type
    pub var_type: PinType,
    /// Category label, possibly empty
    pub category: String,
    /// Whether the variable is exposed to instances
    pub exposed: bool,
    /// Default literal, when one is set
    pub default_value: Option<PinValue>,
}

impl VariableDecl {
    /// Create a new variable declaration.
    pub fn new(name: impl Into<String>, var_type: PinType) -> Self {
        Self {
            name: name.into(),
            var_type,
            category: String::new(),
            exposed: false,
            default_value: None,
        }
    }

    /// Set the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Mark the variable as exposed.
    pub fn exposed(mut self) -> Self {
        self.exposed = true;
        self
    }

    /// Set the default literal.
    pub fn with_default(mut self, value: PinValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// An attached component declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDecl {
    /// Variable-style component name
    pub name: String,
    /// Concrete implementing type, absent when the template is missing
    pub template_class: Option<String>,
}

impl ComponentDecl {
    /// Create a component declaration with a concrete template type.
    pub fn new(name: impl Into<String>, template_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template_class: Some(template_class.into()),
        }
    }

    /// Create a declaration whose template is missing.
    pub fn without_template(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template_class: None,
        }
    }
}

/// A complete visual-script asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptAsset {
    /// Asset name
    pub name: String,
    /// Asset path
    pub path: String,
    /// Parent type, when the script inherits one
    pub parent_class: Option<String>,
    /// Generated type, when one has been produced
    pub generated_class: Option<String>,
    /// Top-level event graphs
    pub graphs: Vec<Graph>,
    /// Function graphs
    pub function_graphs: Vec<Graph>,
    /// Declared variables
    pub variables: Vec<VariableDecl>,
    /// Attached components
    pub components: Vec<ComponentDecl>,
}

impl ScriptAsset {
    /// Create a new empty asset.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            parent_class: None,
            generated_class: None,
            graphs: Vec::new(),
            function_graphs: Vec::new(),
            variables: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Set the parent type name.
    pub fn with_parent_class(mut self, parent: impl Into<String>) -> Self {
        self.parent_class = Some(parent.into());
        self
    }

    /// Set the generated type name.
    pub fn with_generated_class(mut self, generated: impl Into<String>) -> Self {
        self.generated_class = Some(generated.into());
        self
    }

    /// Append a top-level event graph.
    pub fn with_graph(mut self, graph: Graph) -> Self {
        self.graphs.push(graph);
        self
    }

    /// Append a function graph.
    pub fn with_function_graph(mut self, graph: Graph) -> Self {
        self.function_graphs.push(graph);
        self
    }

    /// Append a variable declaration.
    pub fn with_variable(mut self, variable: VariableDecl) -> Self {
        self.variables.push(variable);
        self
    }

    /// Append a component declaration.
    pub fn with_component(mut self, component: ComponentDecl) -> Self {
        self.components.push(component);
        self
    }

    /// Every graph: top-level graphs first, then function graphs.
    pub fn all_graphs(&self) -> impl Iterator<Item = &Graph> {
        self.graphs.iter().chain(self.function_graphs.iter())
    }

    /// Serialize the asset to RON text.
    pub fn to_ron(&self) -> Result<String, AssetFormatError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        Ok(text)
    }

    /// Parse an asset from RON text.
    pub fn from_ron(text: &str) -> Result<Self, AssetFormatError> {
        let asset = ron::from_str(text)?;
        Ok(asset)
    }
}

/// Error reading or writing the on-disk asset format
#[derive(Debug, thiserror::Error)]
pub enum AssetFormatError {
    /// RON serialization failed
    #[error("failed to serialize asset: {0}")]
    Serialize(#[from] ron::Error),

    /// RON parsing failed
    #[error("failed to parse asset: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
