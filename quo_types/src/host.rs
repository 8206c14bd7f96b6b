//! Generic structural conversions of the host type system.
//!
//! Covers primitives and collections. Element conversions recurse through
//! `convert::convert`, so the Number rules also apply inside collections.
//! Capsule types have no host conversions.

use std::collections::BTreeMap;

use crate::convert::{self, ConversionError};
use crate::ty::Type;
use crate::value::{Known, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostConversion {
    ToDynamic,
    /// Only null and unknown values can have the dynamic type, and the
    /// conversion wrapper handles both, so this rule never sees a payload.
    FromDynamic,
    StringToNumber,
    StringToBool,
    NumberToString,
    BoolToString,
    ListToList,
    TupleToList,
    MapToMap,
    ObjectToMap,
    TupleToTuple,
    ListToTuple,
    ObjectToObject,
}

fn convertible(from: &Type, to: &Type) -> bool {
    from == to || to.is_dynamic() || convert::get_conversion(from, to).is_some()
}

pub fn get_conversion(from: &Type, to: &Type) -> Option<HostConversion> {
    use HostConversion::*;

    let conv = match (from, to) {
        (_, Type::Dynamic) => ToDynamic,
        (Type::Dynamic, _) => FromDynamic,
        (Type::String, Type::HostNumber) => StringToNumber,
        (Type::String, Type::Bool) => StringToBool,
        (Type::HostNumber, Type::String) => NumberToString,
        (Type::Bool, Type::String) => BoolToString,
        (Type::List(a), Type::List(b)) if convertible(a, b) => ListToList,
        (Type::Tuple(ts), Type::List(b)) if ts.iter().all(|t| convertible(t, b)) => TupleToList,
        (Type::Map(a), Type::Map(b)) if convertible(a, b) => MapToMap,
        (Type::Object(attrs), Type::Map(b)) if attrs.values().all(|t| convertible(t, b)) => {
            ObjectToMap
        }
        (Type::Tuple(a), Type::Tuple(b))
            if a.len() == b.len() && a.iter().zip(b).all(|(x, y)| convertible(x, y)) =>
        {
            TupleToTuple
        }
        (Type::List(a), Type::Tuple(bs)) if bs.iter().all(|b| convertible(a, b)) => ListToTuple,
        (Type::Object(a), Type::Object(b))
            if b
                .iter()
                .all(|(name, t)| a.get(name).is_some_and(|s| convertible(s, t))) =>
        {
            ObjectToObject
        }
        _ => return None,
    };
    Some(conv)
}

impl HostConversion {
    /// Convert a known, non-null payload.
    pub fn apply(self, known: Known, target: &Type) -> Result<Value, ConversionError> {
        use HostConversion::*;

        match (self, known, target) {
            (ToDynamic, known, _) => Ok(Value::Known(known)),
            (StringToNumber, Known::String(s), _) => parse_host_number(&s).map(Value::host_number),
            (StringToBool, Known::String(s), _) => match s.as_str() {
                "true" => Ok(Value::bool(true)),
                "false" => Ok(Value::bool(false)),
                _ => Err(ConversionError::BoolRequired),
            },
            (NumberToString, Known::HostNumber(n), _) => Ok(Value::string(n.to_string())),
            (BoolToString, Known::Bool(b), _) => Ok(Value::string(b.to_string())),
            (ListToList, Known::List { items, .. }, Type::List(elem))
            | (TupleToList, Known::Tuple(items), Type::List(elem)) => {
                let elem: &Type = elem;
                let items = convert_items(items, |_| elem)?;
                build_list(elem, items)
            }
            (MapToMap, Known::Map { entries, .. }, Type::Map(elem))
            | (ObjectToMap, Known::Object(entries), Type::Map(elem)) => {
                let mut converted = BTreeMap::new();
                for (k, v) in entries {
                    let v = convert::convert(v, elem).map_err(|e| e.at(format!("[{:?}]", k)))?;
                    converted.insert(k, v);
                }
                build_map(elem, converted)
            }
            (TupleToTuple, Known::Tuple(items), Type::Tuple(tys))
            | (ListToTuple, Known::List { items, .. }, Type::Tuple(tys)) => {
                if items.len() != tys.len() {
                    return Err(ConversionError::LengthMismatch {
                        want: tys.len(),
                        got: items.len(),
                    });
                }
                Ok(Value::tuple(convert_items(items, |i| &tys[i])?))
            }
            (ObjectToObject, Known::Object(mut attrs), Type::Object(tys)) => {
                let mut converted = BTreeMap::new();
                for (name, ty) in tys {
                    let v = attrs
                        .remove(name)
                        .ok_or_else(|| ConversionError::MissingAttribute(name.clone()))?;
                    let v = convert::convert(v, ty).map_err(|e| e.at(format!(".{}", name)))?;
                    converted.insert(name.clone(), v);
                }
                Ok(Value::Known(Known::Object(converted)))
            }
            (_, known, target) => Err(ConversionError::Mismatch {
                from: known.ty(),
                to: target.clone(),
            }),
        }
    }
}

fn convert_items<'t>(
    items: Vec<Value>,
    target_at: impl Fn(usize) -> &'t Type,
) -> Result<Vec<Value>, ConversionError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, v)| convert::convert(v, target_at(i)).map_err(|e| e.at(format!("[{}]", i))))
        .collect()
}

/// Element type after conversion. Converted items already have the target
/// element type unless it contains `Dynamic`, in which case the items'
/// common concrete type is used and they must agree.
fn unify(elem: &Type, mut types: impl Iterator<Item = Type>) -> Result<Type, ConversionError> {
    let Some(first) = types.next() else {
        return Ok(elem.clone());
    };
    if types.all(|t| t == first) {
        Ok(first)
    } else {
        Err(ConversionError::InconsistentElements)
    }
}

fn build_list(elem: &Type, items: Vec<Value>) -> Result<Value, ConversionError> {
    let element = unify(elem, items.iter().map(Value::ty))?;
    Ok(Value::list(element, items))
}

fn build_map(elem: &Type, entries: BTreeMap<String, Value>) -> Result<Value, ConversionError> {
    let element = unify(elem, entries.values().map(Value::ty))?;
    Ok(Value::map(element, entries))
}

/// Decimal text to a host number. Rejects anything but plain decimal or
/// exponent notation, including `inf` and `NaN`.
fn parse_host_number(s: &str) -> Result<f64, ConversionError> {
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !plain {
        return Err(ConversionError::NumberRequired);
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ConversionError::NumberRequired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Number;

    #[test]
    fn test_primitive_conversions() {
        assert_eq!(
            convert::convert(Value::string("1.5"), &Type::HostNumber),
            Ok(Value::host_number(1.5))
        );
        assert_eq!(
            convert::convert(Value::host_number(1.5), &Type::String),
            Ok(Value::string("1.5"))
        );
        assert_eq!(
            convert::convert(Value::string("true"), &Type::Bool),
            Ok(Value::bool(true))
        );
        assert_eq!(
            convert::convert(Value::bool(false), &Type::String),
            Ok(Value::string("false"))
        );
    }

    #[test]
    fn test_primitive_failures() {
        assert_eq!(
            convert::convert(Value::string("hi"), &Type::HostNumber),
            Err(ConversionError::NumberRequired)
        );
        assert_eq!(
            convert::convert(Value::string("inf"), &Type::HostNumber),
            Err(ConversionError::NumberRequired)
        );
        assert_eq!(
            convert::convert(Value::string("yes"), &Type::Bool),
            Err(ConversionError::BoolRequired)
        );
    }

    #[test]
    fn test_capsules_have_no_host_conversions() {
        assert_eq!(get_conversion(&Type::NUMBER, &Type::String), None);
        assert_eq!(get_conversion(&Type::ASSET_AMOUNT, &Type::HostNumber), None);
        assert_eq!(get_conversion(&Type::opaque("duration"), &Type::String), None);
    }

    #[test]
    fn test_tuple_to_list_of_numbers() {
        let tuple = Value::tuple(vec![Value::string("1"), Value::host_number(2.5)]);
        let got = convert::convert(tuple, &Type::list(Type::NUMBER)).unwrap();
        assert_eq!(
            got,
            Value::list(
                Type::NUMBER,
                vec![Value::number_int(1), Value::number(Number::must_parse("2.5"))]
            )
        );
    }

    #[test]
    fn test_element_error_carries_path() {
        let tuple = Value::tuple(vec![Value::string("1"), Value::string("x")]);
        let err = convert::convert(tuple, &Type::list(Type::NUMBER)).unwrap_err();
        assert_eq!(err.to_string(), "[1]: a number is required");
    }

    #[test]
    fn test_object_to_object_drops_extra_attributes() {
        let obj = Value::object([
            ("code", Value::string("USD")),
            ("issuer", Value::null(Type::String)),
            ("memo", Value::bool(true)),
        ]);
        let target = Type::object([("code", Type::String), ("issuer", Type::String)]);
        let got = convert::convert(obj, &target).unwrap();
        assert_eq!(got.ty(), target);
        assert_eq!(got.attr("memo"), None);
    }

    #[test]
    fn test_object_missing_attribute_has_no_rule() {
        let from = Type::object([("code", Type::String)]);
        let to = Type::object([("code", Type::String), ("issuer", Type::String)]);
        assert_eq!(get_conversion(&from, &to), None);
    }

    #[test]
    fn test_list_to_tuple_length_checked() {
        let list = Value::list(Type::String, vec![Value::string("a")]);
        let err = convert::convert(list, &Type::tuple(vec![Type::String, Type::String])).unwrap_err();
        assert_eq!(err, ConversionError::LengthMismatch { want: 2, got: 1 });
    }

    #[test]
    fn test_dynamic_element_unifies() {
        let tuple = Value::tuple(vec![Value::string("a"), Value::string("b")]);
        let got = convert::convert(tuple, &Type::list(Type::Dynamic)).unwrap();
        assert_eq!(got.ty(), Type::list(Type::String));

        let mixed = Value::tuple(vec![Value::string("a"), Value::bool(true)]);
        assert_eq!(
            convert::convert(mixed, &Type::list(Type::Dynamic)),
            Err(ConversionError::InconsistentElements)
        );
    }

    #[test]
    fn test_object_to_map() {
        let obj = Value::object([("a", Value::string("1")), ("b", Value::string("2"))]);
        let got = convert::convert(obj, &Type::map(Type::NUMBER)).unwrap();
        assert_eq!(got.ty(), Type::map(Type::NUMBER));
    }

    #[test]
    fn test_from_dynamic_passes_null_and_unknown() {
        assert_eq!(
            convert::convert(Value::dynamic(), &Type::String),
            Ok(Value::unknown(Type::String))
        );
        assert_eq!(
            convert::convert(Value::null(Type::Dynamic), &Type::Bool),
            Ok(Value::null(Type::Bool))
        );
    }
}
