//! Message formatting
//!
//! Turns a log call's argument list into the single display string stored on
//! `LogEntry::message`. Formatting is total: every failure degrades to a
//! placeholder string.

use crate::constants::{CIRCULAR_SENTINEL, MAX_SAFE_INTEGER};
use crate::error::{DevlogError, Result};
use crate::value::{format_number, Value};
use std::collections::HashSet;

/// Build the message for a log call: optional tag, then each argument, joined by one space
pub fn format_message(tag: Option<&str>, args: &[Value]) -> String {
    tag.map(str::to_string)
        .into_iter()
        .chain(args.iter().map(format_arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a single argument.
///
/// Primitives stringify directly. Arrays, objects and opaque values are
/// rendered as indented JSON, or `[Object: <type tag>]` when they cannot be.
pub fn format_arg(value: &Value) -> String {
    if value.is_structured() {
        match to_json(value).and_then(|json| to_pretty(&json, value)) {
            Ok(text) => text,
            Err(_) => format!("[Object: {}]", value.type_tag()),
        }
    } else {
        primitive_to_string(value)
    }
}

/// Plain string conversion of a primitive
pub fn primitive_to_string(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::BigInt(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.type_tag(),
    }
}

/// Convert a value into JSON, replacing revisited references with the
/// circular sentinel.
///
/// Fails on values with no JSON representation (`BigInt`, `Opaque`) anywhere
/// in the graph.
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    let mut seen = HashSet::new();
    Ok(convert(value, &mut seen)?.unwrap_or(serde_json::Value::Null))
}

fn to_pretty(json: &serde_json::Value, source: &Value) -> Result<String> {
    serde_json::to_string_pretty(json).map_err(|_| DevlogError::Unserializable {
        type_name: source.type_tag(),
    })
}

/// Returns `None` for values JSON omits (`undefined` members).
fn convert(value: &Value, seen: &mut HashSet<usize>) -> Result<Option<serde_json::Value>> {
    if let Some(id) = value.ref_id() {
        if !seen.insert(id) {
            return Ok(Some(serde_json::Value::String(CIRCULAR_SENTINEL.to_string())));
        }
    }

    let json = match value {
        Value::Undefined => return Ok(None),
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => json_number(*n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::BigInt(_) | Value::Opaque(_) => {
            return Err(DevlogError::Unserializable {
                type_name: value.type_tag(),
            })
        }
        Value::Array(arr) => {
            let items = arr.try_borrow().map_err(|_| DevlogError::Unserializable {
                type_name: value.type_tag(),
            })?;
            let mut out = Vec::with_capacity(items.len());
            for item in items.iter() {
                out.push(convert(item, seen)?.unwrap_or(serde_json::Value::Null));
            }
            serde_json::Value::Array(out)
        }
        Value::Object(obj) => {
            let members = obj.try_borrow().map_err(|_| DevlogError::Unserializable {
                type_name: value.type_tag(),
            })?;
            let mut out = serde_json::Map::with_capacity(members.len());
            for (key, member) in members.iter() {
                if let Some(json) = convert(member, seen)? {
                    out.insert(key.clone(), json);
                }
            }
            serde_json::Value::Object(out)
        }
    };

    Ok(Some(json))
}

/// Integral values serialize without a fraction; non-finite values become `null`
fn json_number(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn test_primitives_join_with_space() {
        let message = format_message(None, &args!["a", 1, true, Value::Null, ()]);
        assert_eq!(message, "a 1 true null undefined");
    }

    #[test]
    fn test_tag_comes_first() {
        let message = format_message(Some("[WARN]"), &args!["low disk"]);
        assert_eq!(message, "[WARN] low disk");
    }

    #[test]
    fn test_object_is_indented_json() {
        let obj = Value::object().with("code", 500);
        assert_eq!(format_arg(&obj), "{\n  \"code\": 500\n}");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(format_arg(&Value::object()), "{}");
        assert_eq!(format_arg(&Value::array([])), "[]");
    }

    #[test]
    fn test_self_reference_becomes_sentinel() {
        let obj = Value::object().with("name", "root");
        obj.set("self", obj.clone());

        let text = format_arg(&obj);
        assert_eq!(text.matches(CIRCULAR_SENTINEL).count(), 1);
        assert!(text.contains("\"self\": \"[Circular]\""));
    }

    #[test]
    fn test_indirect_cycle_through_array() {
        let obj = Value::object();
        let list = Value::array([Value::from(1)]);
        list.push(obj.clone());
        obj.set("children", list);

        let text = format_arg(&obj);
        assert_eq!(text.matches(CIRCULAR_SENTINEL).count(), 1);
    }

    #[test]
    fn test_undefined_members_omitted_and_nulled_in_arrays() {
        let obj = Value::object()
            .with("gone", ())
            .with("list", Value::array([Value::Undefined, Value::from(f64::NAN)]));

        let json = to_json(&obj).unwrap();
        assert_eq!(json, serde_json::json!({ "list": [null, null] }));
    }

    #[test]
    fn test_nested_bigint_falls_back_to_type_tag() {
        let obj = Value::object().with("big", Value::BigInt(1 << 70));
        assert_eq!(format_arg(&obj), "[Object: [object Object]]");

        let arr = Value::array([Value::BigInt(1)]);
        assert_eq!(format_arg(&arr), "[Object: [object Array]]");
    }

    #[test]
    fn test_top_level_bigint_is_a_primitive() {
        assert_eq!(format_arg(&Value::BigInt(12)), "12");
    }

    #[test]
    fn test_opaque_falls_back() {
        assert_eq!(
            format_arg(&Value::opaque("Window")),
            "[Object: [object Window]]"
        );
    }

    #[test]
    fn test_borrowed_container_falls_back() {
        let arr = Value::array([Value::from(1)]);
        let guard = match &arr {
            Value::Array(inner) => inner.borrow_mut(),
            _ => unreachable!(),
        };
        assert_eq!(format_arg(&arr), "[Object: [object Array]]");
        drop(guard);
        assert_eq!(format_arg(&arr), "[\n  1\n]");
    }

    #[test]
    fn test_fractional_numbers_keep_fraction() {
        let obj = Value::object().with("ratio", 0.25);
        assert_eq!(format_arg(&obj), "{\n  \"ratio\": 0.25\n}");
    }
}
