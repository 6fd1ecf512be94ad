//! Field-level checks for JSON request payloads.
//!
//! Payloads are checked against a declared field list before serde sees
//! them, so every problem is reported with its location rather than only the
//! first one serde trips over. Values that carry the right meaning in the
//! wrong JSON type (`"10"` for a price, `5.0` for a stock count) are coerced
//! to the declared type first.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Float,
    Integer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

/// A request body whose shape is described by a static field list.
pub trait Payload: DeserializeOwned {
    const FIELDS: &'static [FieldSpec];
}

/// One entry of a 422 `detail` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|segment| segment.to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    pub fn body_field(field: &str, msg: &str, kind: &str) -> Self {
        Self::new(&["body", field], msg, kind)
    }

    pub fn invalid_path_integer(param: &str) -> Self {
        Self::new(&["path", param], "value is not a valid integer", "type_error.integer")
    }
}

pub fn parse_payload<T: Payload>(body: &[u8]) -> Result<T, Vec<FieldError>> {
    let value: Value = serde_json::from_slice(body).map_err(|error| {
        vec![FieldError::new(&["body"], error.to_string(), "value_error.jsondecode")]
    })?;

    let Value::Object(mut object) = value else {
        return Err(vec![FieldError::new(
            &["body"],
            "value is not a valid dict",
            "type_error.dict",
        )]);
    };

    let errors = coerce_fields(&mut object, T::FIELDS);
    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|error| vec![FieldError::new(&["body"], error.to_string(), "value_error")])
}

/// Rewrites every declared field into its canonical JSON type in place and
/// returns the errors for fields that cannot be coerced.
fn coerce_fields(object: &mut Map<String, Value>, fields: &[FieldSpec]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for spec in fields {
        match coerce_field(object.get(spec.name), spec) {
            Ok(Some(coerced)) => {
                object.insert(spec.name.to_string(), coerced);
            }
            Ok(None) => {}
            Err(error) => errors.push(error),
        }
    }
    errors
}

fn coerce_field(value: Option<&Value>, spec: &FieldSpec) -> Result<Option<Value>, FieldError> {
    match value {
        None if spec.required => {
            Err(FieldError::body_field(spec.name, "field required", "value_error.missing"))
        }
        Some(Value::Null) if spec.required => Err(FieldError::body_field(
            spec.name,
            "none is not an allowed value",
            "type_error.none.not_allowed",
        )),
        None | Some(Value::Null) => Ok(None),
        Some(value) => coerce_kind(value, spec.kind).map(Some).ok_or_else(|| kind_error(spec)),
    }
}

fn coerce_kind(value: &Value, kind: FieldKind) -> Option<Value> {
    match (kind, value) {
        (FieldKind::Text, Value::String(_)) => Some(value.clone()),
        (FieldKind::Text, Value::Number(number)) => Some(Value::String(number.to_string())),
        (FieldKind::Float, Value::Number(_)) => Some(value.clone()),
        (FieldKind::Float, Value::String(raw)) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|parsed| parsed.is_finite())
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        (FieldKind::Integer, Value::Number(number)) => number
            .as_i64()
            .or_else(|| whole_float(number.as_f64()?))
            .map(Value::from),
        (FieldKind::Integer, Value::String(raw)) => {
            raw.trim().parse::<i64>().ok().map(Value::from)
        }
        _ => None,
    }
}

fn whole_float(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

fn kind_error(spec: &FieldSpec) -> FieldError {
    match spec.kind {
        FieldKind::Text => {
            FieldError::body_field(spec.name, "str type expected", "type_error.str")
        }
        FieldKind::Float => {
            FieldError::body_field(spec.name, "value is not a valid float", "type_error.float")
        }
        FieldKind::Integer => FieldError::body_field(
            spec.name,
            "value is not a valid integer",
            "type_error.integer",
        ),
    }
}
