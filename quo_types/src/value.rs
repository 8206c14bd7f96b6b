//! Value model.
//!
//! A value is exactly one of Null, Unknown or Known. Null and Unknown carry
//! the type the value would have; a Known payload determines its own type.
//! Values are never mutated after construction.

use std::collections::BTreeMap;

use crate::amount::AssetAmount;
use crate::number::Number;
use crate::ty::{Capsule, Type};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null(Type),
    Unknown(Type),
    Known(Known),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Known {
    String(String),
    Bool(bool),
    HostNumber(f64),
    List { element: Type, items: Vec<Value> },
    Map { element: Type, entries: BTreeMap<String, Value> },
    Tuple(Vec<Value>),
    Object(BTreeMap<String, Value>),
    Number(Number),
    AssetAmount(AssetAmount),
    Opaque { capsule: String, payload: Vec<u8> },
}

impl Known {
    pub fn ty(&self) -> Type {
        match self {
            Known::String(_) => Type::String,
            Known::Bool(_) => Type::Bool,
            Known::HostNumber(_) => Type::HostNumber,
            Known::List { element, .. } => Type::list(element.clone()),
            Known::Map { element, .. } => Type::map(element.clone()),
            Known::Tuple(items) => Type::Tuple(items.iter().map(Value::ty).collect()),
            Known::Object(attrs) => {
                Type::Object(attrs.iter().map(|(k, v)| (k.clone(), v.ty())).collect())
            }
            Known::Number(_) => Type::NUMBER,
            Known::AssetAmount(_) => Type::ASSET_AMOUNT,
            Known::Opaque { capsule, .. } => Type::Capsule(Capsule::Opaque(capsule.clone())),
        }
    }
}

impl Value {
    pub fn null(ty: Type) -> Value {
        Value::Null(ty)
    }

    pub fn unknown(ty: Type) -> Value {
        Value::Unknown(ty)
    }

    /// Unknown value of unknown type.
    pub fn dynamic() -> Value {
        Value::Unknown(Type::Dynamic)
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::Known(Known::String(s.into()))
    }

    pub fn bool(b: bool) -> Value {
        Value::Known(Known::Bool(b))
    }

    pub fn host_number(n: f64) -> Value {
        Value::Known(Known::HostNumber(n))
    }

    /// Wrap a Number. The number is moved in and owned by the value.
    pub fn number(n: Number) -> Value {
        Value::Known(Known::Number(n))
    }

    pub fn number_int(n: i64) -> Value {
        Value::number(Number::from_i64(n))
    }

    pub fn asset_amount(a: AssetAmount) -> Value {
        Value::Known(Known::AssetAmount(a))
    }

    /// A list whose items all have type `element`. Panics otherwise.
    pub fn list(element: Type, items: Vec<Value>) -> Value {
        for (i, item) in items.iter().enumerate() {
            let item_ty = item.ty();
            if item_ty != element {
                panic!(
                    "Inconsistent list element: item {} has type {}, list wants {}",
                    i, item_ty, element
                );
            }
        }
        Value::Known(Known::List { element, items })
    }

    /// A map whose entries all have type `element`. Panics otherwise.
    pub fn map(element: Type, entries: BTreeMap<String, Value>) -> Value {
        for (k, v) in &entries {
            let entry_ty = v.ty();
            if entry_ty != element {
                panic!(
                    "Inconsistent map element: {:?} has type {}, map wants {}",
                    k, entry_ty, element
                );
            }
        }
        Value::Known(Known::Map { element, entries })
    }

    pub fn tuple(items: Vec<Value>) -> Value {
        Value::Known(Known::Tuple(items))
    }

    pub fn object<I, K>(attrs: I) -> Value
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Known(Known::Object(
            attrs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn opaque(capsule: impl Into<String>, payload: Vec<u8>) -> Value {
        Value::Known(Known::Opaque {
            capsule: capsule.into(),
            payload,
        })
    }

    pub fn ty(&self) -> Type {
        match self {
            Value::Null(ty) | Value::Unknown(ty) => ty.clone(),
            Value::Known(k) => k.ty(),
        }
    }

    /// False only for Unknown. A null value is known: its absence is certain.
    pub fn is_known(&self) -> bool {
        !matches!(self, Value::Unknown(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    pub fn as_known(&self) -> Option<&Known> {
        match self {
            Value::Known(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Known(Known::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Known(Known::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn as_asset_amount(&self) -> Option<AssetAmount> {
        match self {
            Value::Known(Known::AssetAmount(a)) => Some(*a),
            _ => None,
        }
    }

    /// Attribute of a known object value.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Known(Known::Object(attrs)) => attrs.get(name),
            _ => None,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::number(n)
    }
}

impl From<AssetAmount> for Value {
    fn from(a: AssetAmount) -> Self {
        Value::asset_amount(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types() {
        assert_eq!(Value::string("x").ty(), Type::String);
        assert_eq!(Value::number_int(1).ty(), Type::NUMBER);
        assert_eq!(Value::asset_amount(AssetAmount::new(1)).ty(), Type::ASSET_AMOUNT);
        assert_eq!(
            Value::tuple(vec![Value::bool(true), Value::null(Type::String)]).ty(),
            Type::tuple(vec![Type::Bool, Type::String])
        );
        assert_eq!(
            Value::object([("a", Value::unknown(Type::NUMBER))]).ty(),
            Type::object([("a", Type::NUMBER)])
        );
        assert_eq!(Value::list(Type::Bool, vec![]).ty(), Type::list(Type::Bool));
        assert_eq!(Value::opaque("duration", vec![1]).ty(), Type::opaque("duration"));
    }

    #[test]
    fn test_states_are_exclusive() {
        let null = Value::null(Type::String);
        assert!(null.is_null());
        assert!(null.is_known());

        let unknown = Value::unknown(Type::String);
        assert!(!unknown.is_null());
        assert!(!unknown.is_known());

        let known = Value::string("x");
        assert!(!known.is_null());
        assert!(known.is_known());
    }

    #[test]
    #[should_panic(expected = "Inconsistent list element")]
    fn test_list_rejects_mixed_items() {
        Value::list(Type::String, vec![Value::string("a"), Value::bool(true)]);
    }

    #[test]
    fn test_list_accepts_null_and_unknown_of_element_type() {
        let list = Value::list(
            Type::String,
            vec![Value::null(Type::String), Value::unknown(Type::String)],
        );
        assert_eq!(list.ty(), Type::list(Type::String));
    }
}
