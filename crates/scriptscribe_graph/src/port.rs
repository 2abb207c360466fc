// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// Semantic category of a pin type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinCategory {
    /// Execution flow
    Exec,
    /// Boolean value
    Boolean,
    /// Byte value
    Byte,
    /// Integer value
    Int,
    /// Floating point value
    Float,
    /// String value
    String,
    /// Name token
    Name,
    /// Localizable text
    Text,
    /// Struct value
    Struct,
    /// Enum value
    Enum,
    /// Delegate binding
    Delegate,
    /// Reference to an externally defined object
    Object,
    /// Class reference
    Class,
    /// Interface reference
    Interface,
    /// Matches any category (for generic nodes)
    Wildcard,
    /// Custom category
    Custom(String),
}

impl PinCategory {
    /// Canonical lowercase token for this category.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exec => "exec",
            Self::Boolean => "bool",
            Self::Byte => "byte",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Name => "name",
            Self::Text => "text",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Delegate => "delegate",
            Self::Object => "object",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Wildcard => "wildcard",
            Self::Custom(token) => token,
        }
    }

    /// Whether values of this category reference externally defined objects.
    pub fn is_object_reference(&self) -> bool {
        matches!(self, Self::Object)
    }
}

/// Semantic type carried by a port or variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinType {
    /// Base category
    pub category: PinCategory,
    /// Referenced type name, for object/struct-typed values
    pub sub_object: Option<String>,
    /// Whether the value is a collection of the base type
    pub is_array: bool,
}

impl PinType {
    /// Create a plain pin type with no referenced type.
    pub fn new(category: PinCategory) -> Self {
        Self {
            category,
            sub_object: None,
            is_array: false,
        }
    }

    /// Set the referenced type name.
    pub fn with_sub_object(mut self, name: impl Into<String>) -> Self {
        self.sub_object = Some(name.into());
        self
    }

    /// Mark the type as a collection.
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Whether this is an execution pin.
    pub fn is_exec(&self) -> bool {
        self.category == PinCategory::Exec
    }

    /// Canonical string form: `base`, `base<Sub>`, or `Array<...>` around
    /// either when the collection flag is set.
    pub fn type_string(&self) -> String {
        let mut rendered = self.category.as_str().to_string();
        if let Some(sub_object) = &self.sub_object {
            rendered = format!("{rendered}<{sub_object}>");
        }
        if self.is_array {
            rendered = format!("Array<{rendered}>");
        }
        rendered
    }
}

/// Default literal held by an unconnected port or a variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PinValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    String(String),
    /// Name token
    Name(String),
    /// 3D vector
    Vector([f64; 3]),
}

impl PinValue {
    /// Render the literal in its canonical text form.
    ///
    /// Canonical forms: `true`/`false` for booleans, decimal digits for
    /// integers, shortest round-trip decimal for floats, the raw text for
    /// strings and names, and `(X=..,Y=..,Z=..)` for vectors. The same
    /// value always renders to the same text.
    pub fn render(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::String(value) | Self::Name(value) => value.clone(),
            Self::Vector([x, y, z]) => format!("(X={x},Y={y},Z={z})"),
        }
    }
}

/// Reference to an object asset held as a port default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Object name
    pub name: String,
    /// Full object path
    pub path: String,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A port on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Port name, unique within the owning node
    pub name: String,
    /// Display name shown in editors
    pub display_name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Semantic type
    pub pin_type: PinType,
    /// Static default literal, present only when the port carries one
    pub default_value: Option<PinValue>,
    /// Default object reference, for object-category ports
    pub default_object: Option<ObjectRef>,
}

impl Port {
    /// Create a new input port.
    pub fn input(name: impl Into<String>, pin_type: PinType) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            direction: PortDirection::Input,
            pin_type,
            default_value: None,
            default_object: None,
        }
    }

    /// Create a new output port.
    pub fn output(name: impl Into<String>, pin_type: PinType) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            direction: PortDirection::Output,
            pin_type,
            default_value: None,
            default_object: None,
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Set the default literal.
    pub fn with_default(mut self, value: PinValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Set the default object reference.
    pub fn with_default_object(mut self, object: ObjectRef) -> Self {
        self.default_object = Some(object);
        self
    }
}
