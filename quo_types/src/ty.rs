//! Type model.
//!
//! Structural: two types are equal iff their shapes are recursively equal.
//! Capsule types compare by identity only.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of capsule kinds.
///
/// `Opaque` stands for any capsule registered by the host that this core
/// does not understand. Such values are carried through untouched: they
/// have no indices and no conversions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capsule {
    Number,
    AssetAmount,
    Opaque(String),
}

impl Capsule {
    pub fn name(&self) -> &str {
        match self {
            Capsule::Number => "number",
            Capsule::AssetAmount => "asset amount",
            Capsule::Opaque(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    String,
    Bool,
    /// The host's own (binary float) number type.
    HostNumber,
    List(Box<Type>),
    Map(Box<Type>),
    Tuple(Vec<Type>),
    Object(BTreeMap<String, Type>),
    Capsule(Capsule),
    /// Placeholder for a type not yet known.
    Dynamic,
}

impl Type {
    pub const NUMBER: Type = Type::Capsule(Capsule::Number);
    pub const ASSET_AMOUNT: Type = Type::Capsule(Capsule::AssetAmount);

    pub fn list(element: Type) -> Type {
        Type::List(Box::new(element))
    }

    pub fn map(element: Type) -> Type {
        Type::Map(Box::new(element))
    }

    pub fn tuple(elements: Vec<Type>) -> Type {
        Type::Tuple(elements)
    }

    pub fn object<I, K>(attrs: I) -> Type
    where
        I: IntoIterator<Item = (K, Type)>,
        K: Into<String>,
    {
        Type::Object(attrs.into_iter().map(|(k, t)| (k.into(), t)).collect())
    }

    pub fn opaque(name: impl Into<String>) -> Type {
        Type::Capsule(Capsule::Opaque(name.into()))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Type::Dynamic)
    }

    /// Element type of a list or map.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::List(t) | Type::Map(t) => Some(t),
            _ => None,
        }
    }

    pub fn attribute_type(&self, name: &str) -> Option<&Type> {
        match self {
            Type::Object(attrs) => attrs.get(name),
            _ => None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute_type(name).is_some()
    }

    /// Short human name, as used in "... required" messages.
    pub fn friendly_name(&self) -> String {
        match self {
            Type::String => "string".to_string(),
            Type::Bool => "bool".to_string(),
            Type::HostNumber => "number".to_string(),
            Type::List(t) => format!("list of {}", t.friendly_name()),
            Type::Map(t) => format!("map of {}", t.friendly_name()),
            Type::Tuple(_) => "tuple".to_string(),
            Type::Object(_) => "object".to_string(),
            Type::Capsule(c) => c.name().to_string(),
            Type::Dynamic => "dynamic".to_string(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.friendly_name())
    }
}
